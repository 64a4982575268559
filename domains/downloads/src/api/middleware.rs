//! Downloads domain state

use std::sync::Arc;

use crate::client::{FileStore, UpstreamFetcher};
use crate::domain::ResourceProxyPolicy;

/// Application state for the Downloads domain
#[derive(Clone)]
pub struct DownloadsState {
    pub policy: ResourceProxyPolicy,
    pub fetcher: Arc<dyn UpstreamFetcher>,
    pub store: Arc<dyn FileStore>,
}
