use thiserror::Error;

use crate::types::Segment;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Claims could not be serialized: {0}")]
    Serialization(String),
    #[error("Invalid token structure: expected 3 segments, found {segments}")]
    MalformedToken { segments: usize },
    #[error("Invalid base64 in {segment} segment: {source}")]
    Encoding {
        segment: Segment,
        #[source]
        source: base64::DecodeError,
    },
    #[error("Invalid JSON in {segment} segment: {source}")]
    Deserialization {
        segment: Segment,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid expiration '{value}': {reason}")]
    TimeParse { value: String, reason: String },
    #[error("Token expired at {expired_at}")]
    Expired { expired_at: String },
    #[error("Unexpected algorithm: {}", found.as_deref().unwrap_or("<missing>"))]
    UnexpectedAlgorithm { found: Option<String> },
}

impl TokenError {
    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Serialization(_) => "serialization",
            TokenError::MalformedToken { .. } => "malformed_token",
            TokenError::Encoding { .. } => "encoding",
            TokenError::Deserialization { .. } => "deserialization",
            TokenError::TimeParse { .. } => "time_parse",
            TokenError::Expired { .. } => "expired",
            TokenError::UnexpectedAlgorithm { .. } => "unexpected_algorithm",
        }
    }

    pub(crate) fn serialization(err: impl std::fmt::Display) -> Self {
        TokenError::Serialization(err.to_string())
    }
}
