use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";
/// Wall-clock layout of the `exp` header field, e.g. `2024-05-01 13:45:00`.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First segment of every token. Field order matters for the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,
}

impl Header {
    pub fn new(exp: Option<String>) -> Self {
        Header {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
            exp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::Payload => write!(f, "payload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_json_is_bit_exact() {
        let header = Header::new(Some("2030-01-02 03:04:05".to_string()));
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"HS256","typ":"JWT","exp":"2030-01-02 03:04:05"}"#
        );
    }

    #[test]
    fn non_expiring_header_omits_exp() {
        let header = Header::new(None);
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"HS256","typ":"JWT"}"#
        );
    }
}
