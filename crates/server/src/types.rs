use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summarize request
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Selected text
    pub text: String,

    /// API key; the server's default key is used when absent
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Summarize response
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error variant name (e.g. "transport")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl SummarizeResponse {
    pub fn ok(summary: String) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(error: String, kind: &str) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(error),
            error_kind: Some(kind.to_string()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub mode: String,
    pub backend: String,
    pub timestamp: DateTime<Utc>,
}
