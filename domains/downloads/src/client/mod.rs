//! Outbound clients: upstream fetch and the owned file store

pub mod fetcher;
pub mod storage;

pub use fetcher::{HttpFetcher, UpstreamFetcher};
pub use storage::{FileStore, GcsFileStore, StoredObject};
