pub mod auth;
pub mod navigation;
pub mod ui;
pub mod users;
