//! Application Controller
//!
//! `App` owns the explicit application state (session, chat relay,
//! selected sign, view state) and implements every user action. Renderers
//! only read `App::view`.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

use super::forms::{validate_login, validate_registration};
use super::state::{AuthTab, ChatMessage, NavTab, ViewState};
use crate::chat::ChatRelay;
use crate::client::{ApiError, ApiResult, AuthResponse, FortuneBackend, HealthResponse};
use crate::session::{SessionManager, Storage, User};
use crate::zodiac::{Fortune, FortunePresenter, ZodiacSign, ZodiacTable};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const UNREACHABLE: &str = "Unable to reach the fortune teller. Please try again.";

/// Message for a failed auth exchange: the server's detail verbatim when
/// present, otherwise the action's fallback
fn auth_error_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Status { detail: Some(detail), .. } => detail.clone(),
        e if e.is_network() => UNREACHABLE.to_string(),
        _ => fallback.to_string(),
    }
}

pub struct App<S: Storage> {
    backend: Arc<dyn FortuneBackend>,
    session: SessionManager<S>,
    presenter: FortunePresenter,
    relay: ChatRelay,
    view: ViewState,
    /// Display name of the selected sign, sent with chat messages
    current_sign: Option<String>,
    rng: Box<dyn RngCore + Send>,
}

impl<S: Storage> App<S> {
    pub fn new(backend: Arc<dyn FortuneBackend>, storage: S, table: ZodiacTable) -> Self {
        Self {
            relay: ChatRelay::new(backend.clone()),
            backend,
            session: SessionManager::new(storage),
            presenter: FortunePresenter::new(table),
            view: ViewState::default(),
            current_sign: None,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source (deterministic tests)
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Restore the stored session and pick the initial view.
    /// Returns true when the user is already signed in.
    pub fn start(&mut self) -> bool {
        let signed_in = self.session.load();
        match self.session.user() {
            Some(user) if signed_in => {
                let username = user.username.clone();
                self.view.show_main(&username);
            }
            _ => self.view.show_auth(),
        }
        tracing::debug!(signed_in, "Started session");
        signed_in
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub fn table(&self) -> &ZodiacTable {
        self.presenter.table()
    }

    pub fn current_sign(&self) -> Option<&str> {
        self.current_sign.as_deref()
    }

    pub fn chat_session_id(&self) -> Option<&str> {
        self.relay.session_id()
    }

    // ----- Auth -----

    pub fn select_auth_tab(&mut self, tab: AuthTab) {
        self.view.select_auth_tab(tab);
    }

    /// Validate, log in, persist the session. On failure the message is in
    /// `view().login_error`.
    pub async fn submit_login(&mut self, username: &str, password: &str) -> bool {
        self.view.login_error = None;

        let request = match validate_login(username, password) {
            Ok(request) => request,
            Err(e) => {
                self.view.login_error = Some(e.to_string());
                return false;
            }
        };

        match self.backend.login(&request).await {
            Ok(auth) => {
                self.complete_auth(auth);
                true
            }
            Err(e) => {
                tracing::debug!("Login failed: {}", e);
                self.view.login_error = Some(auth_error_message(&e, LOGIN_FAILED));
                false
            }
        }
    }

    /// Validate, register, persist the session. On failure the message is
    /// in `view().register_error`.
    pub async fn submit_register(&mut self, username: &str, email: &str, password: &str) -> bool {
        self.view.register_error = None;

        let request = match validate_registration(username, email, password) {
            Ok(request) => request,
            Err(e) => {
                self.view.register_error = Some(e.to_string());
                return false;
            }
        };

        match self.backend.register(&request).await {
            Ok(auth) => {
                self.complete_auth(auth);
                true
            }
            Err(e) => {
                tracing::debug!("Registration failed: {}", e);
                self.view.register_error = Some(auth_error_message(&e, REGISTRATION_FAILED));
                false
            }
        }
    }

    fn complete_auth(&mut self, auth: AuthResponse) {
        if let Err(e) = self.session.save(&auth.access_token, &auth.user) {
            tracing::warn!("Failed to persist session: {}", e);
        }
        self.view.show_main(&auth.user.username);
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        self.view.show_auth();
    }

    /// Fetch the profile for the stored token, refreshing the stored copy
    pub async fn refresh_user(&mut self) -> ApiResult<User> {
        let token = self
            .session
            .auth_token()
            .map(str::to_string)
            .ok_or(ApiError::Status {
                status: 401,
                detail: Some("Not logged in".to_string()),
            })?;

        let user = self.backend.current_user(&token).await?;
        if let Err(e) = self.session.save(&token, &user) {
            tracing::warn!("Failed to persist session: {}", e);
        }
        Ok(user)
    }

    pub async fn health(&self) -> ApiResult<HealthResponse> {
        self.backend.health().await
    }

    // ----- Fortune -----

    /// Card click: remember the sign for chat and show its fortune
    pub fn select_sign(&mut self, sign: ZodiacSign) -> &Fortune {
        self.set_chat_sign(sign);
        self.display_fortune(sign)
    }

    /// Use `sign` as the chat context without opening the fortune panel
    pub fn set_chat_sign(&mut self, sign: ZodiacSign) {
        self.current_sign = Some(self.presenter.table().entry(sign).name.clone());
    }

    /// Draw a fresh fortune and switch to the fortune panel
    pub fn display_fortune(&mut self, sign: ZodiacSign) -> &Fortune {
        let today = chrono::Local::now().date_naive();
        let fortune = self.presenter.draw(sign, today, &mut *self.rng);
        self.view.show_fortune(fortune)
    }

    pub fn back_to_selection(&mut self) {
        self.view.back_to_selection();
    }

    pub fn switch_tab(&mut self, tab: NavTab) {
        self.view.switch_tab(tab);
    }

    // ----- Chat -----

    /// First half of a send: trims the input, appends it to the transcript,
    /// disables the controls and shows the typing indicator. Returns the
    /// message to relay, or `None` for blank input or while a send is
    /// already pending.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() || self.view.chat.is_pending() {
            return None;
        }

        self.view.chat.push(ChatMessage::user(message));
        self.view.chat.input_focused = false;
        self.view.chat.begin_pending();
        self.relay.ensure_session_id(&mut *self.rng);

        Some(message.to_string())
    }

    /// Second half of a send: relays the message and shows the reply or
    /// the error. Controls are re-enabled on every outcome.
    pub async fn complete_send(&mut self, message: String) {
        let token = self.session.auth_token().map(str::to_string);
        let sign = self.current_sign.clone();

        let result = self
            .relay
            .send(token.as_deref(), &message, sign.as_deref(), &mut *self.rng)
            .await;

        match result {
            Ok(reply) => self.view.chat.push(ChatMessage::oracle(&reply)),
            Err(e) => self.view.chat.push(ChatMessage::error(&e.to_string())),
        }

        self.view.chat.end_pending();
    }

    /// Send a typed message. Returns false when the input was ignored.
    pub async fn send_message(&mut self, input: &str) -> bool {
        match self.begin_send(input) {
            Some(message) => {
                self.complete_send(message).await;
                true
            }
            None => false,
        }
    }

    /// Clear the conversation: server history, transcript and session id.
    /// Failures are logged only.
    pub async fn clear_chat(&mut self) {
        let token = self.session.auth_token().map(str::to_string);

        match self.relay.clear(token.as_deref()).await {
            Ok(true) => self.view.chat.truncate_to_welcome(),
            Ok(false) => {}
            Err(e) => tracing::error!("Error clearing chat: {}", e),
        }
    }
}
