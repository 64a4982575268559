//! API layer for the Downloads domain
//!
//! Contains HTTP handlers, routes and domain state.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::DownloadsState;
pub use routes::routes;
