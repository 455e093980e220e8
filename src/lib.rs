//! Compact HMAC-signed tokens.
//!
//! A token is three base64url segments joined by `.`:
//!
//! ```text
//! base64url({"alg":"HS256","typ":"JWT","exp":"YYYY-MM-DD HH:MM:SS"})
//!   . base64url(claims-json)
//!   . base64url(HMAC-SHA256(header_b64 "." payload_b64, secret))
//! ```
//!
//! `exp` is a wall-clock time in the issuing clock's zone (the host's local
//! zone for the free functions below).
//!
//! ```
//! use serde_json::json;
//!
//! let token = compact_token::encode(&json!({"a": "b", "c": 1}), 3600, "secret").unwrap();
//! assert!(compact_token::verify(&token, "secret").unwrap());
//! assert!(!compact_token::verify(&token, "wrong").unwrap());
//! assert_eq!(compact_token::decode(&token).unwrap()["a"], "b");
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod jwt_core;
pub mod types;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CodecConfig;
pub use error::{Result, TokenError};
pub use jwt_core::codec::TokenCodec;
pub use jwt_core::signer::sign;
pub use types::{Claims, Header};

/// Signs `claims` into a token expiring `ttl_seconds` from now (local time).
pub fn encode<C, K>(claims: &C, ttl_seconds: i64, secret: K) -> Result<String>
where
    C: Serialize + ?Sized,
    K: AsRef<[u8]>,
{
    TokenCodec::new().encode(claims, ttl_seconds, secret)
}

/// Signs `claims` into a token that never expires.
pub fn encode_non_expiring<C, K>(claims: &C, secret: K) -> Result<String>
where
    C: Serialize + ?Sized,
    K: AsRef<[u8]>,
{
    TokenCodec::new().encode_non_expiring(claims, secret)
}

/// Checks the token's signature. Expiry is not considered.
pub fn verify<K: AsRef<[u8]>>(token: &str, secret: K) -> Result<bool> {
    TokenCodec::new().verify(token, secret)
}

/// Returns the claims of an unexpired token. The signature is not checked.
pub fn decode(token: &str) -> Result<Claims> {
    TokenCodec::new().decode(token)
}

/// Like [`decode`] but maps the claims into a caller type.
pub fn decode_as<T: DeserializeOwned>(token: &str) -> Result<T> {
    TokenCodec::new().decode_as(token)
}
