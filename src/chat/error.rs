//! Chat error types
//!
//! Maps backend failures onto the messages shown in the transcript.

use thiserror::Error;

use crate::client::ApiError;

/// Fallback when the server gives no usable detail
pub const CHAT_FAILED: &str = "Failed to get response";

/// User-facing chat failures. `Display` is the message shown in the
/// transcript.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// HTTP 401
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Any other non-success status
    #[error("{0}")]
    Server(String),

    /// No usable answer from the server
    #[error("Unable to connect to fortune teller. Please try again.")]
    Connection,
}

impl From<ApiError> for ChatError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401, .. } => ChatError::SessionExpired,
            ApiError::Status { detail, .. } => {
                ChatError::Server(detail.unwrap_or_else(|| CHAT_FAILED.to_string()))
            }
            ApiError::Unavailable
            | ApiError::Timeout
            | ApiError::Decode(_)
            | ApiError::Request(_) => ChatError::Connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: ChatError = ApiError::Status {
            status: 401,
            detail: Some("Could not validate credentials".to_string()),
        }
        .into();
        assert_eq!(err, ChatError::SessionExpired);
        assert_eq!(err.to_string(), "Session expired. Please login again.");

        let err: ChatError = ApiError::Status {
            status: 503,
            detail: Some("AI service temporarily unavailable".to_string()),
        }
        .into();
        assert_eq!(err.to_string(), "AI service temporarily unavailable");

        let err: ChatError = ApiError::Status { status: 500, detail: None }.into();
        assert_eq!(err.to_string(), "Failed to get response");
    }

    #[test]
    fn test_connection_mapping() {
        let err: ChatError = ApiError::Unavailable.into();
        assert_eq!(err.to_string(), "Unable to connect to fortune teller. Please try again.");
        assert_eq!(ChatError::from(ApiError::Timeout), ChatError::Connection);
        assert_eq!(ChatError::from(ApiError::Decode("eof".into())), ChatError::Connection);
    }
}
