//! Service seams between the stores and the remote API.
//!
//! The stores only ever see these traits, so tests swap in the scripted stubs
//! from `infrastructure::testing` and the console never touches `reqwest`.

pub mod auth;
pub mod users;

pub use auth::{AuthApiAdapter, AuthService};
pub use users::{UserAdminApiAdapter, UserAdminService};
