use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use tracing::debug;

use crate::clock::Clock;
use crate::config::CodecConfig;
use crate::error::{Result, TokenError};
use crate::jwt_core::signer;
use crate::jwt_core::verifier::split;
use crate::types::{Claims, Header, Segment, ALGORITHM, EXPIRATION_FORMAT};

/// Header and payload of a token, parsed but not yet checked.
pub(crate) struct Parts {
    pub header: Map<String, Value>,
    pub payload: Claims,
}

fn decode_segment(segment: Segment, encoded: &str) -> Result<Vec<u8>> {
    signer::b64_decode(encoded).map_err(|source| TokenError::Encoding { segment, source })
}

fn parse_object(segment: Segment, bytes: &[u8]) -> Result<Map<String, Value>> {
    serde_json::from_slice(bytes).map_err(|source| TokenError::Deserialization { segment, source })
}

/// Splits and parses the first two segments. Both are base64-decoded before
/// either is read as JSON.
pub(crate) fn parse(token: &str) -> Result<Parts> {
    let [header_b64, payload_b64, _] = split(token)?;
    let header_bytes = decode_segment(Segment::Header, header_b64)?;
    let payload_bytes = decode_segment(Segment::Payload, payload_b64)?;

    Ok(Parts {
        header: parse_object(Segment::Header, &header_bytes)?,
        payload: parse_object(Segment::Payload, &payload_bytes)?,
    })
}

/// Parses an `exp` header value into a wall-clock time.
fn parse_expiration(exp: &Value) -> Result<NaiveDateTime> {
    let text = match exp {
        Value::String(text) => text,
        other => {
            return Err(TokenError::TimeParse {
                value: other.to_string(),
                reason: "expected a string".to_string(),
            })
        }
    };
    NaiveDateTime::parse_from_str(text, EXPIRATION_FORMAT).map_err(|e| TokenError::TimeParse {
        value: text.clone(),
        reason: e.to_string(),
    })
}

/// Fails when the header carries an expiration at or before `clock.now()`.
/// A missing or null `exp` never expires.
pub(crate) fn check_expiration(header: &Map<String, Value>, clock: &dyn Clock) -> Result<()> {
    let exp = match header.get("exp") {
        None | Some(Value::Null) => return Ok(()),
        Some(exp) => exp,
    };
    let wall = parse_expiration(exp)?;
    let expires_at = clock.from_wall_time(wall).ok_or_else(|| TokenError::TimeParse {
        value: wall.format(EXPIRATION_FORMAT).to_string(),
        reason: "does not exist in the local time zone".to_string(),
    })?;

    if expires_at <= clock.now() {
        debug!(%expires_at, "rejected expired token");
        return Err(TokenError::Expired {
            expired_at: wall.format(EXPIRATION_FORMAT).to_string(),
        });
    }
    Ok(())
}

fn check_algorithm(header: &Map<String, Value>) -> Result<()> {
    match header.get("alg").and_then(Value::as_str) {
        Some(ALGORITHM) => Ok(()),
        found => Err(TokenError::UnexpectedAlgorithm {
            found: found.map(String::from),
        }),
    }
}

/// Parses a token and enforces its expiration. The signature is not checked.
pub(crate) fn decode(token: &str, clock: &dyn Clock, config: &CodecConfig) -> Result<Claims> {
    let Parts { header, payload } = parse(token)?;
    if config.require_algorithm {
        check_algorithm(&header)?;
    }
    check_expiration(&header, clock)?;
    Ok(payload)
}

/// Typed view of the header without any expiry or algorithm checks.
pub(crate) fn decode_header(token: &str) -> Result<Header> {
    let Parts { header, .. } = parse(token)?;
    serde_json::from_value(Value::Object(header)).map_err(|source| TokenError::Deserialization {
        segment: Segment::Header,
        source,
    })
}
