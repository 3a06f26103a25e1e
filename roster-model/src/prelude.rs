//! Console focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in roster-core or the console.

pub use super::auth::{AuthToken, LoginRequest, LoginResponse};
pub use super::error::ApiErrorBody;
pub use super::ids::UserId;
pub use super::page::UserPage;
pub use super::requests::{
    RegisterRequest, RegisterResponse, UpdateUserRequest, UpdateUserResponse,
};
pub use super::user::User;
