//! Chat Relay
//!
//! Forwards messages to `/chat` and tracks the conversation's session id.

use rand::Rng;
use std::sync::Arc;

use super::error::ChatError;
use crate::client::{ApiError, ChatRequest, FortuneBackend};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 9;

/// `session_<unix millis>_<9 base-36 chars>`
pub fn generate_session_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let fragment: String = (0..FRAGMENT_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("session_{}_{}", millis, fragment)
}

/// Relays chat messages and owns the conversation's session id
pub struct ChatRelay {
    backend: Arc<dyn FortuneBackend>,
    session_id: Option<String>,
}

impl ChatRelay {
    pub fn new(backend: Arc<dyn FortuneBackend>) -> Self {
        Self {
            backend,
            session_id: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Current session id, generating one if the conversation has none
    pub fn ensure_session_id<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.session_id
            .get_or_insert_with(|| generate_session_id(rng))
            .as_str()
    }

    /// Send one message. On success the server's session id replaces ours
    /// and the reply text is returned.
    pub async fn send<R: Rng + ?Sized>(
        &mut self,
        token: Option<&str>,
        message: &str,
        zodiac_sign: Option<&str>,
        rng: &mut R,
    ) -> Result<String, ChatError> {
        let request = ChatRequest {
            message: message.to_string(),
            session_id: Some(self.ensure_session_id(rng).to_string()),
            zodiac_sign: zodiac_sign.map(str::to_string),
        };

        match self.backend.chat(token, &request).await {
            Ok(reply) => {
                if request.session_id.as_deref() != Some(reply.session_id.as_str()) {
                    tracing::debug!(
                        client_id = ?request.session_id,
                        server_id = %reply.session_id,
                        "Adopting server session id"
                    );
                }
                self.session_id = Some(reply.session_id);
                Ok(reply.response)
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Clear the server-side history for the current conversation.
    ///
    /// Returns `Ok(false)` without a request when there is no session id.
    /// Any HTTP answer completes the clear and drops the id; a transport
    /// failure leaves the id in place.
    pub async fn clear(&mut self, token: Option<&str>) -> Result<bool, ApiError> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(false);
        };

        match self.backend.clear_history(token, &session_id).await {
            Ok(()) => {}
            Err(e @ ApiError::Status { .. }) => {
                tracing::warn!(session_id = %session_id, "Clear history answered with error: {}", e);
            }
            Err(e) => return Err(e),
        }

        self.session_id = None;
        Ok(true)
    }
}
