//! View Model
//!
//! Presentation state kept independent of any rendering surface:
//!
//! - **state**: `ViewState`, panels, tabs, transcript and the `Region`
//!   visibility mapping
//! - **forms**: login/registration field validation
//! - **app**: `App`, the controller every user action goes through
//! - **render**: `TextRenderer` for terminals
//!
//! # Architecture
//!
//! ```text
//! user action → App → (SessionManager | FortunePresenter | ChatRelay)
//!                   → ViewState → Renderer
//! ```

pub mod app;
pub mod forms;
pub mod render;
pub mod state;

pub use app::App;
pub use forms::{validate_login, validate_registration, FormError, MIN_PASSWORD_LEN};
pub use render::TextRenderer;
pub use state::{AuthTab, ChatMessage, ChatView, MessageRole, NavTab, Panel, Region, ViewState};
