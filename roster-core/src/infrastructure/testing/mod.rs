//! Scripted test doubles for the service seams.
//!
//! Compiled for this crate's tests and, behind the `testing` feature, for
//! integration tests and downstream crates.

pub mod stubs;

pub use stubs::{
    RecordedCall, StubAuthService, StubUserAdminService, demo_page,
    demo_users,
};
