//! Core library for the Roster console.
//!
//! Talks to the remote demo user API through [`ApiClient`] and the service
//! traits in [`infrastructure::services`], keeps the session and the loaded
//! page of users in their stores, and models the console's view state as a
//! message/effect loop driven by [`App`].
#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod common;
pub mod config;
pub mod domains;
pub mod error;
pub mod infrastructure;

pub use app::{App, Services};
pub use common::messages::{DomainMessage, Effect};
pub use config::{ClientConfig, ConfigOverrides};
pub use domains::auth::{
    FileTokenStorage, MemoryTokenStorage, Session, SessionStore, TokenStorage,
};
pub use domains::navigation::{AccessState, Route};
pub use domains::users::{
    FetchOutcome, FetchTicket, RefreshPolicy, UserCollectionStore, filter_users,
};
pub use error::{ApiError, ApiResult, ConfigError, StorageError, ValidationError};
pub use infrastructure::ApiClient;
