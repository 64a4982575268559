//! Outbound fetch for authorized resources

use std::time::Duration;

use axum::body::Body;
use reqwest::{redirect, Client, Url};

use crate::error::ProxyError;

/// Fetches a URL the proxy policy already accepted
#[async_trait::async_trait]
pub trait UpstreamFetcher: Send + Sync {
    /// Stream the body of a successful response. Transport errors, timeouts
    /// and non-success statuses are all `UpstreamFetch`.
    async fn fetch(&self, url: &Url) -> Result<Body, ProxyError>;
}

/// `reqwest` fetcher that never follows redirects, so an allowlisted host
/// cannot bounce the request somewhere else
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `timeout` bounds the whole exchange, body included
    pub fn new(timeout: Duration) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::UpstreamFetch(format!("failed to build client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl UpstreamFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Body, ProxyError> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                ProxyError::UpstreamFetch("upstream timed out".to_string())
            } else {
                ProxyError::UpstreamFetch(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamFetch(format!(
                "upstream returned {}",
                status
            )));
        }

        Ok(Body::from_stream(response.bytes_stream()))
    }
}
