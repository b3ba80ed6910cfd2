//! Request/Response DTOs
//!
//! Field names follow the backend's JSON exactly (`sessionId`,
//! `zodiacSign`, `access_token`).

use serde::{Deserialize, Serialize};

use crate::session::User;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    /// Display name of the selected sign ("Aries"), null when none
    pub zodiac_sign: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearHistoryRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub has_api_key: Option<bool>,
    /// The backend sends this one in snake case
    #[serde(default, rename = "database_connected")]
    pub database_connected: Option<bool>,
}

/// Error body returned by the backend: `{"detail": ...}`.
///
/// `detail` is usually a string but validation failures send a list.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
