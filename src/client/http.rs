//! Fortune Teller REST API Client
//!
//! HTTP client for the backend's `/auth`, `/chat` and `/clear-history`
//! endpoints. One request per call, no retries.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::FortuneBackend;
use super::dto::{
    AuthResponse, ChatRequest, ChatResponse, ClearHistoryRequest, ErrorBody, HealthResponse,
    LoginRequest, RegisterRequest,
};
use super::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::session::User;

/// reqwest-backed implementation of [`FortuneBackend`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, token: Option<&str>, body: &B) -> RequestBuilder {
        let request = self.client.post(self.url(path)).json(body);
        with_bearer(request, token)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();

        tracing::debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if status.is_success() {
            Ok(response)
        } else {
            // Error bodies are best effort: anything unparseable has no detail
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail_message());
            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

#[async_trait]
impl FortuneBackend for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        tracing::debug!(username = %request.username, "Registering");
        self.send_json(self.post_json("/auth/register", None, request)).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        tracing::debug!(username = %request.username, "Logging in");
        self.send_json(self.post_json("/auth/login", None, request)).await
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        let request = with_bearer(self.client.get(self.url("/auth/me")), Some(token));
        self.send_json(request).await
    }

    async fn chat(&self, token: Option<&str>, request: &ChatRequest) -> ApiResult<ChatResponse> {
        tracing::debug!(
            session_id = ?request.session_id,
            zodiac_sign = ?request.zodiac_sign,
            "Sending chat message"
        );
        self.send_json(self.post_json("/chat", token, request)).await
    }

    async fn clear_history(&self, token: Option<&str>, session_id: &str) -> ApiResult<()> {
        let body = ClearHistoryRequest {
            session_id: session_id.to_string(),
        };
        self.send(self.post_json("/clear-history", token, &body)).await?;
        Ok(())
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        self.send_json(self.client.get(self.url("/health"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            request_timeout_secs: Some(5),
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/chat"), "http://localhost:3000/api/chat");
    }
}
