use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::CodecConfig;
use crate::error::{Result, TokenError};
use crate::jwt_core::{decoder, encoder, verifier};
use crate::types::{Claims, Header, Segment};

/// Issues, verifies and decodes tokens against one clock and configuration.
///
/// Verification and decoding are separate: [`verify`](Self::verify)
/// proves authenticity and ignores expiry, [`decode`](Self::decode) enforces
/// expiry and ignores the signature. Call both to fully trust a token.
///
/// A codec is immutable and can be shared freely between threads.
#[derive(Clone)]
pub struct TokenCodec {
    clock: Arc<dyn Clock>,
    config: CodecConfig,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("config", &self.config)
            .finish()
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        TokenCodec::new()
    }
}

impl TokenCodec {
    /// Codec on the system clock with default configuration.
    pub fn new() -> Self {
        TokenCodec {
            clock: Arc::new(SystemClock),
            config: CodecConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Signs `claims` into a token that expires `ttl_seconds` from now.
    ///
    /// Zero or negative TTLs are accepted and yield an already expired token.
    pub fn encode<C, K>(&self, claims: &C, ttl_seconds: i64, secret: K) -> Result<String>
    where
        C: Serialize + ?Sized,
        K: AsRef<[u8]>,
    {
        let exp = encoder::expiration(self.clock.as_ref(), ttl_seconds)?;
        encoder::assemble(claims, Some(exp), secret.as_ref())
    }

    /// Signs `claims` into a token without an `exp` header field.
    pub fn encode_non_expiring<C, K>(&self, claims: &C, secret: K) -> Result<String>
    where
        C: Serialize + ?Sized,
        K: AsRef<[u8]>,
    {
        encoder::assemble(claims, None, secret.as_ref())
    }

    /// `Ok(false)` on signature mismatch; errors only on a malformed token.
    pub fn verify<K: AsRef<[u8]>>(&self, token: &str, secret: K) -> Result<bool> {
        verifier::verify(token, secret.as_ref())
    }

    /// Claims of an unexpired token. Does not check the signature.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        decoder::decode(token, self.clock.as_ref(), &self.config)
    }

    /// Like [`decode`](Self::decode) but maps the claims into `T`.
    pub fn decode_as<T: DeserializeOwned>(&self, token: &str) -> Result<T> {
        let claims = self.decode(token)?;
        serde_json::from_value(Value::Object(claims)).map_err(|source| {
            TokenError::Deserialization {
                segment: Segment::Payload,
                source,
            }
        })
    }

    /// Header of a token, with no expiry or algorithm checks.
    pub fn decode_header(&self, token: &str) -> Result<Header> {
        decoder::decode_header(token)
    }

    /// Header and claims as raw JSON, with no expiry or algorithm checks.
    pub fn inspect(&self, token: &str) -> Result<(Value, Value)> {
        let parts = decoder::parse(token)?;
        Ok((Value::Object(parts.header), Value::Object(parts.payload)))
    }
}
