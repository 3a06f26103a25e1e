//! User collection domain
//!
//! The loaded page, pagination and the mutations that go through it.

pub mod messages;
pub mod search;
pub mod store;
pub mod update;

pub use search::filter_users;
pub use store::{
    FetchOutcome, FetchTicket, MutationKind, RefreshPolicy, UserCollectionStore,
};
