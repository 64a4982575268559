//! API layer for the Sessions domain
//!
//! Contains HTTP handlers, routes, the entry guard and domain state.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::SessionsState;
pub use routes::routes;
