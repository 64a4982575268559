//! Shared configuration and error handling for the portal
//!
//! - Configuration management following 12-factor principles
//! - The HTTP-facing error type used by domain handlers
//! - A validating query-string extractor

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedQuery;
