use serde::Serialize;
use serde_json::Value;

/// Report printed by the command-line front end.
#[derive(Debug, Default, Serialize)]
pub struct Output {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    pub detail: String,
}

impl Output {
    pub fn new(status: &str, detail: impl Into<String>) -> Self {
        Output {
            status: status.to_string(),
            detail: detail.into(),
            ..Default::default()
        }
    }
}
