//! Authentication domain
//!
//! Holds the session token and decides route access.

pub mod messages;
pub mod session;
pub mod storage;
pub mod update;

pub use session::{Session, SessionStore};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
