use chrono::Duration;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::clock::Clock;
use crate::error::{Result, TokenError};
use crate::jwt_core::signer;
use crate::types::{Header, EXPIRATION_FORMAT};

fn b64(bytes: &[u8]) -> String {
    base64::encode_config(bytes, base64::URL_SAFE_NO_PAD)
}

/// Wall-clock expiration `ttl_seconds` from now, in the clock's zone.
pub(crate) fn expiration(clock: &dyn Clock, ttl_seconds: i64) -> Result<String> {
    let expires_at = Duration::try_seconds(ttl_seconds)
        .and_then(|ttl| clock.now().checked_add_signed(ttl))
        .ok_or_else(|| {
            TokenError::serialization(format!("ttl of {} seconds is out of range", ttl_seconds))
        })?;
    Ok(clock
        .to_wall_time(expires_at)
        .format(EXPIRATION_FORMAT)
        .to_string())
}

/// Serializes, signs and joins header and claims into a token.
pub(crate) fn assemble<C>(claims: &C, exp: Option<String>, secret: &[u8]) -> Result<String>
where
    C: Serialize + ?Sized,
{
    let payload = serde_json::to_value(claims).map_err(TokenError::serialization)?;
    if !matches!(payload, Value::Object(_)) {
        return Err(TokenError::serialization("claims must serialize to a JSON object"));
    }
    let payload_json = serde_json::to_vec(&payload).map_err(TokenError::serialization)?;
    let header_json =
        serde_json::to_vec(&Header::new(exp.clone())).map_err(TokenError::serialization)?;

    let signing_input = format!("{}.{}", b64(&header_json), b64(&payload_json));
    let signature = signer::sign(signing_input.as_bytes(), secret);

    debug!(exp = exp.as_deref().unwrap_or("never"), "issued token");
    Ok(format!("{}.{}", signing_input, signature))
}
