use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Envelope shared by every data API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn saved(message: impl Into<String>, files: Vec<String>) -> Self {
        Self { success: true, message: Some(message.into()), files: Some(files), data: None, error: None }
    }

    pub fn loaded(data: Value) -> Self {
        Self { success: true, message: None, files: None, data: Some(data), error: None }
    }

    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self { success: false, message: Some(message.into()), files: None, data: None, error }
    }
}
