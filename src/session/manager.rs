//! Session Manager
//!
//! Mirrors the persisted token and user into memory.

use super::error::SessionResult;
use super::storage::Storage;
use super::user::User;

/// Storage key for the raw bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key for the JSON-serialized user
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Owns the session storage and the in-memory copy of the session
pub struct SessionManager<S: Storage> {
    storage: S,
    auth_token: Option<String>,
    user: Option<User>,
}

impl<S: Storage> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            auth_token: None,
            user: None,
        }
    }

    /// Persist both values and keep them in memory.
    ///
    /// Memory is updated even when the write fails, so the running session
    /// stays signed in.
    pub fn save(&mut self, token: &str, user: &User) -> SessionResult<()> {
        self.auth_token = Some(token.to_string());
        self.user = Some(user.clone());

        let user_json = serde_json::to_string(user)?;
        self.storage.set_item(AUTH_TOKEN_KEY, token)?;
        self.storage.set_item(CURRENT_USER_KEY, &user_json)?;

        tracing::debug!(username = %user.username, "Saved session");
        Ok(())
    }

    /// Read both values back into memory. Returns true when a non-empty
    /// token and a parseable user are present.
    pub fn load(&mut self) -> bool {
        self.auth_token = self
            .storage
            .get_item(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty());

        self.user = self
            .storage
            .get_item(CURRENT_USER_KEY)
            .filter(|json| !json.is_empty())
            .and_then(|json| match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable stored user: {}", e);
                    None
                }
            });

        self.is_authenticated()
    }

    /// Remove both values from storage and memory
    pub fn clear(&mut self) -> SessionResult<()> {
        self.auth_token = None;
        self.user = None;

        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        self.storage.remove_item(CURRENT_USER_KEY)?;

        tracing::debug!("Cleared session");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some() && self.user.is_some()
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
