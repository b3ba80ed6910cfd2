//! Chat Relay
//!
//! Forwards messages to the fortune teller's `/chat` endpoint and keeps the
//! conversation's session id.
//!
//! ## Session id lifecycle
//!
//! 1. Generated client side on the first message (`session_<millis>_<base36>`)
//! 2. Replaced by whatever id the server returns with each reply
//! 3. Dropped by `clear`, so the next message starts a new conversation

mod error;
mod relay;

pub use error::ChatError;
pub use relay::{generate_session_id, ChatRelay};
