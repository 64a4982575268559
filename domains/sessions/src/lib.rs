//! Sessions domain: login exchange, session query, logout, page entry guard

pub mod api;

// Re-export API types
pub use api::routes;
pub use api::SessionsState;
