//! Downloads domain: SSRF-safe resource proxy and file retrieval by path
//!
//! Caller-supplied URLs pass the fixed [`ResourceProxyPolicy`] before any
//! outbound request is made. Stored objects are addressed by server-known
//! path only.

pub mod api;
pub mod client;
pub mod domain;
pub mod error;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

// Re-export API types
pub use api::{routes, DownloadsState};

pub use client::{FileStore, GcsFileStore, HttpFetcher, StoredObject, UpstreamFetcher};
pub use domain::ResourceProxyPolicy;
pub use error::{ProxyError, StoreError};
