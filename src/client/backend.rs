//! Backend abstraction

use async_trait::async_trait;

use super::dto::{AuthResponse, ChatRequest, ChatResponse, HealthResponse, LoginRequest, RegisterRequest};
use super::error::ApiResult;
use crate::session::User;

/// Operations the application needs from the fortune teller backend
#[async_trait]
pub trait FortuneBackend: Send + Sync {
    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// `GET /auth/me`
    async fn current_user(&self, token: &str) -> ApiResult<User>;

    /// `POST /chat`
    async fn chat(&self, token: Option<&str>, request: &ChatRequest) -> ApiResult<ChatResponse>;

    /// `POST /clear-history`
    async fn clear_history(&self, token: Option<&str>, session_id: &str) -> ApiResult<()>;

    /// `GET /health`
    async fn health(&self) -> ApiResult<HealthResponse>;
}
