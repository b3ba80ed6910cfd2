//! # Zodiac Oracle
//!
//! Client for the zodiac fortune teller service. Signed-in users pick a
//! zodiac sign to read a daily fortune drawn from a local table, or chat
//! with the AI fortune teller behind the backend.
//!
//! ## Features
//!
//! - **Accounts**: registration and login against the backend, with the
//!   bearer token and profile persisted between runs
//! - **Daily fortunes**: composed locally from the zodiac table, with
//!   random energy levels, lucky numbers and compatibility
//! - **Oracle chat**: conversation relay with a per-conversation session id
//!   and server-side history clearing
//! - **Headless view model**: every screen transition lives in
//!   [`view::ViewState`], so any surface can render it
//!
//! ## Modules
//!
//! - [`zodiac`]: Zodiac table and fortune composition
//! - [`session`]: Persistent auth session
//! - [`client`]: Backend HTTP client
//! - [`chat`]: Chat session relay
//! - [`view`]: View state, controller and terminal renderer
//! - [`config`]: Configuration loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zodiac_oracle::{ApiClient, App, Config, MemoryStorage, ZodiacSign, ZodiacTable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(ApiClient::new(&config.api)?);
//!
//!     let mut app = App::new(backend, MemoryStorage::new(), ZodiacTable::builtin()?);
//!     app.start();
//!
//!     if app.submit_login("luna", "secret").await {
//!         let fortune = app.select_sign(ZodiacSign::Leo);
//!         println!("{}", fortune.fortune);
//!
//!         app.send_message("What does today hold for me?").await;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod client;
pub mod config;
pub mod session;
pub mod view;
pub mod zodiac;

// Re-export top-level types for convenience
pub use zodiac::{
    EnergyLevels, Fortune, FortunePresenter, ZodiacEntry, ZodiacError, ZodiacResult, ZodiacSign,
    ZodiacTable,
};

pub use session::{
    FileStorage, MemoryStorage, SessionError, SessionManager, SessionResult, Storage, User,
};

pub use client::{ApiClient, ApiError, ApiResult, FortuneBackend};

pub use chat::{generate_session_id, ChatError, ChatRelay};

pub use view::{App, FormError, Region, TextRenderer, ViewState};

pub use config::{Config, ConfigError, LoggingConfig};
