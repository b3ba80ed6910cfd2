//! View State
//!
//! Everything a renderer needs to draw the app, with the transitions that
//! keep panels mutually exclusive.

use serde::Serialize;

use crate::zodiac::Fortune;

/// Greeting shown as the first (retained) transcript entry
pub const WELCOME_MESSAGE: &str = "Welcome, seeker. I am the Oracle of the Stars.\nAsk me about love, career, or whatever weighs on your heart, and I will read what the cosmos holds for you.";

/// Main-app panels; exactly one is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Panel {
    ZodiacSelection,
    FortuneDisplay,
    Chat,
}

/// Navigation tabs of the main app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavTab {
    Zodiac,
    Chat,
}

/// Tabs of the auth screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthTab {
    Login,
    Register,
}

/// Fixed screen regions a renderer can show or hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    AuthSection,
    MainApp,
    UserInfo,
    LoginForm,
    RegisterForm,
    ZodiacSelection,
    FortuneDisplay,
    ChatInterface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageRole {
    User,
    Oracle,
    Error,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    /// Non-blank lines of the content
    pub paragraphs: Vec<String>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: &str) -> Self {
        let paragraphs = content
            .split('\n')
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { role, paragraphs }
    }

    pub fn user(content: &str) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn oracle(content: &str) -> Self {
        Self::new(MessageRole::Oracle, content)
    }

    /// Error entries keep their text as a single line
    pub fn error(content: &str) -> Self {
        Self {
            role: MessageRole::Error,
            paragraphs: vec![content.to_string()],
        }
    }
}

/// Chat panel state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatView {
    /// Always starts with the welcome message
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub input_focused: bool,
}

impl Default for ChatView {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::oracle(WELCOME_MESSAGE)],
            typing: false,
            input_enabled: true,
            send_enabled: true,
            input_focused: false,
        }
    }
}

impl ChatView {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Drop everything after the retained first entry
    pub fn truncate_to_welcome(&mut self) {
        self.messages.truncate(1);
    }

    /// Disable controls and show the typing indicator
    pub fn begin_pending(&mut self) {
        self.send_enabled = false;
        self.input_enabled = false;
        self.typing = true;
    }

    /// Re-enable controls, hide the indicator, focus the input
    pub fn end_pending(&mut self) {
        self.typing = false;
        self.send_enabled = true;
        self.input_enabled = true;
        self.input_focused = true;
    }

    pub fn is_pending(&self) -> bool {
        !self.send_enabled
    }
}

/// Whole-app presentation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub authenticated: bool,
    pub auth_tab: AuthTab,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
    /// "Welcome, {username}!" while signed in
    pub greeting: Option<String>,
    pub active_tab: NavTab,
    pub panel: Panel,
    pub fortune: Option<Fortune>,
    pub chat: ChatView,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            authenticated: false,
            auth_tab: AuthTab::Login,
            login_error: None,
            register_error: None,
            greeting: None,
            active_tab: NavTab::Zodiac,
            panel: Panel::ZodiacSelection,
            fortune: None,
            chat: ChatView::default(),
        }
    }
}

impl ViewState {
    /// Visibility of a fixed region
    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::AuthSection => !self.authenticated,
            Region::MainApp | Region::UserInfo => self.authenticated,
            Region::LoginForm => !self.authenticated && self.auth_tab == AuthTab::Login,
            Region::RegisterForm => !self.authenticated && self.auth_tab == AuthTab::Register,
            Region::ZodiacSelection => self.authenticated && self.panel == Panel::ZodiacSelection,
            Region::FortuneDisplay => self.authenticated && self.panel == Panel::FortuneDisplay,
            Region::ChatInterface => self.authenticated && self.panel == Panel::Chat,
        }
    }

    pub fn show_auth(&mut self) {
        self.authenticated = false;
        self.greeting = None;
    }

    pub fn show_main(&mut self, username: &str) {
        self.authenticated = true;
        self.greeting = Some(format!("Welcome, {}!", username));
    }

    pub fn select_auth_tab(&mut self, tab: AuthTab) {
        self.auth_tab = tab;
    }

    pub fn switch_tab(&mut self, tab: NavTab) {
        self.active_tab = tab;
        self.panel = match tab {
            NavTab::Zodiac => Panel::ZodiacSelection,
            NavTab::Chat => Panel::Chat,
        };
    }

    pub fn show_fortune(&mut self, fortune: Fortune) -> &Fortune {
        self.panel = Panel::FortuneDisplay;
        self.fortune.insert(fortune)
    }

    pub fn back_to_selection(&mut self) {
        self.panel = Panel::ZodiacSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANELS: [Region; 3] = [Region::ZodiacSelection, Region::FortuneDisplay, Region::ChatInterface];

    fn visible_panels(state: &ViewState) -> Vec<Region> {
        PANELS.into_iter().filter(|r| state.is_visible(*r)).collect()
    }

    #[test]
    fn test_initial_state_shows_auth() {
        let state = ViewState::default();
        assert!(state.is_visible(Region::AuthSection));
        assert!(state.is_visible(Region::LoginForm));
        assert!(!state.is_visible(Region::RegisterForm));
        assert!(!state.is_visible(Region::MainApp));
        assert!(!state.is_visible(Region::UserInfo));
        assert!(visible_panels(&state).is_empty());
    }

    #[test]
    fn test_auth_tabs_exclusive() {
        let mut state = ViewState::default();
        state.select_auth_tab(AuthTab::Register);
        assert!(state.is_visible(Region::RegisterForm));
        assert!(!state.is_visible(Region::LoginForm));
    }

    #[test]
    fn test_panels_exclusive() {
        let mut state = ViewState::default();
        state.show_main("luna");
        assert_eq!(state.greeting.as_deref(), Some("Welcome, luna!"));
        assert_eq!(visible_panels(&state), vec![Region::ZodiacSelection]);

        state.switch_tab(NavTab::Chat);
        assert_eq!(visible_panels(&state), vec![Region::ChatInterface]);

        state.switch_tab(NavTab::Zodiac);
        assert_eq!(visible_panels(&state), vec![Region::ZodiacSelection]);

        state.panel = Panel::FortuneDisplay;
        assert_eq!(visible_panels(&state), vec![Region::FortuneDisplay]);
        state.back_to_selection();
        assert_eq!(visible_panels(&state), vec![Region::ZodiacSelection]);

        state.show_auth();
        assert!(visible_panels(&state).is_empty());
        assert!(state.greeting.is_none());
    }

    #[test]
    fn test_message_paragraphs() {
        let msg = ChatMessage::oracle("First line\n\n   \nSecond line\n");
        assert_eq!(msg.paragraphs, vec!["First line", "Second line"]);

        let msg = ChatMessage::error("Session expired. Please login again.");
        assert_eq!(msg.role, MessageRole::Error);
        assert_eq!(msg.paragraphs.len(), 1);
    }

    #[test]
    fn test_chat_pending_cycle() {
        let mut chat = ChatView::default();
        assert_eq!(chat.messages.len(), 1);

        chat.begin_pending();
        assert!(chat.is_pending());
        assert!(chat.typing);
        assert!(!chat.input_enabled);

        chat.end_pending();
        assert!(!chat.is_pending());
        assert!(!chat.typing);
        assert!(chat.input_enabled && chat.send_enabled && chat.input_focused);

        chat.push(ChatMessage::user("hi"));
        chat.push(ChatMessage::oracle("hello"));
        chat.truncate_to_welcome();
        assert_eq!(chat.messages, vec![ChatMessage::oracle(WELCOME_MESSAGE)]);
    }
}
