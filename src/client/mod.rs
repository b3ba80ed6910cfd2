//! Fortune Teller API Client
//!
//! Typed access to the backend that performs authentication, AI chat
//! replies and history persistence.
//!
//! ## Architecture
//!
//! - **FortuneBackend**: async trait the application talks to
//! - **ApiClient**: reqwest implementation of `FortuneBackend`
//! - **dto**: request/response bodies, field names as on the wire

mod backend;
mod http;
pub mod dto;
mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::FortuneBackend;
pub use http::ApiClient;
pub use dto::{
    AuthResponse, ChatRequest, ChatResponse, ClearHistoryRequest, HealthResponse, LoginRequest,
    RegisterRequest,
};
pub use error::{ApiError, ApiResult};
