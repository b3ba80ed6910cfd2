//! API client error types
//!
//! Defines all errors that can occur when talking to the backend.

use thiserror::Error;

/// Errors that can occur when talking to the fortune teller backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server not reachable (connection refused, DNS, reset)
    #[error("Fortune teller backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    /// Non-success status, with the server's `detail` when it sent one
    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// Success status but the body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied detail for `Status` errors
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the request never got an HTTP answer
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ApiError::Unavailable | ApiError::Timeout | ApiError::Request(_)
        )
    }

    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(e)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
