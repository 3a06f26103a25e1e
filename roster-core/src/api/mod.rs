pub mod routes;

pub use routes::v1;
