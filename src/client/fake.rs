//! Scriptable in-memory backend for controller tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::backend::FortuneBackend;
use super::dto::{AuthResponse, ChatRequest, ChatResponse, HealthResponse, LoginRequest, RegisterRequest};
use super::error::{ApiError, ApiResult};
use crate::session::User;

/// What the fake was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register { username: String, email: String },
    Login { username: String },
    CurrentUser { token: String },
    Chat {
        token: Option<String>,
        message: String,
        session_id: Option<String>,
        zodiac_sign: Option<String>,
    },
    ClearHistory { token: Option<String>, session_id: String },
    Health,
}

/// Canned outcome for the next call
pub enum Reply {
    Auth(AuthResponse),
    Chat(ChatResponse),
    Ok,
    Err(ApiError),
}

#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn push_auth(&self, token: &str, username: &str) {
        self.push(Reply::Auth(AuthResponse {
            access_token: token.to_string(),
            token_type: "bearer".to_string(),
            user: User::new(username),
        }));
    }

    pub fn push_chat(&self, response: &str, session_id: &str) {
        self.push(Reply::Chat(ChatResponse {
            response: response.to_string(),
            session_id: session_id.to_string(),
        }));
    }

    pub fn push_status(&self, status: u16, detail: Option<&str>) {
        self.push(Reply::Err(ApiError::Status {
            status,
            detail: detail.map(str::to_string),
        }));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Reply {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Err(ApiError::Unavailable))
    }
}

fn unexpected(reply: Reply) -> ApiError {
    match reply {
        Reply::Err(e) => e,
        _ => ApiError::Decode("unexpected fake reply".to_string()),
    }
}

#[async_trait]
impl FortuneBackend for FakeBackend {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        match self.record(Call::Register {
            username: request.username.clone(),
            email: request.email.clone(),
        }) {
            Reply::Auth(auth) => Ok(auth),
            other => Err(unexpected(other)),
        }
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        match self.record(Call::Login {
            username: request.username.clone(),
        }) {
            Reply::Auth(auth) => Ok(auth),
            other => Err(unexpected(other)),
        }
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        match self.record(Call::CurrentUser {
            token: token.to_string(),
        }) {
            Reply::Auth(auth) => Ok(auth.user),
            other => Err(unexpected(other)),
        }
    }

    async fn chat(&self, token: Option<&str>, request: &ChatRequest) -> ApiResult<ChatResponse> {
        match self.record(Call::Chat {
            token: token.map(str::to_string),
            message: request.message.clone(),
            session_id: request.session_id.clone(),
            zodiac_sign: request.zodiac_sign.clone(),
        }) {
            Reply::Chat(chat) => Ok(chat),
            other => Err(unexpected(other)),
        }
    }

    async fn clear_history(&self, token: Option<&str>, session_id: &str) -> ApiResult<()> {
        match self.record(Call::ClearHistory {
            token: token.map(str::to_string),
            session_id: session_id.to_string(),
        }) {
            Reply::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        match self.record(Call::Health) {
            Reply::Ok => Ok(HealthResponse {
                status: "ok".to_string(),
                message: None,
                has_api_key: Some(true),
                database_connected: Some(true),
            }),
            other => Err(unexpected(other)),
        }
    }
}
