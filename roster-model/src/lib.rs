//! Core data model definitions shared across Roster crates.
//!
//! Field names mirror the remote demo API (`first_name`, `per_page`, ...) so the
//! types deserialize straight from its JSON bodies.
#![allow(missing_docs)]

pub mod auth;
pub mod error;
pub mod ids;
pub mod page;
pub mod prelude;
pub mod requests;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use auth::{AuthToken, LoginRequest, LoginResponse};
pub use error::{ApiErrorBody, ModelError, Result as ModelResult};
pub use ids::UserId;
pub use page::{PageViolation, UserPage};
pub use requests::{
    RegisterRequest, RegisterResponse, UpdateUserRequest, UpdateUserResponse,
};
pub use user::User;
