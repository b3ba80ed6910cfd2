//! Session Management
//!
//! Durable client-side session: an opaque auth token plus the signed-in
//! user's profile, stored under the `authToken` and `currentUser` keys.
//!
//! - **storage**: key/value backends (`FileStorage`, `MemoryStorage`)
//! - **manager**: `SessionManager` save/load/clear
//! - **user**: the `User` profile returned by the backend

mod error;
mod manager;
mod storage;
mod user;

pub use error::{SessionError, SessionResult};
pub use manager::{SessionManager, AUTH_TOKEN_KEY, CURRENT_USER_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use user::User;
