//! Mock upstream fetcher and file store
//!
//! Both record every call so tests can assert that a rejected request never
//! reached the network.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::body::Body;
use reqwest::Url;

use crate::client::{FileStore, StoredObject, UpstreamFetcher};
use crate::error::{ProxyError, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    resources: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failure: Arc<RwLock<bool>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`; any other URL answers 404
    pub fn add_resource(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.resources
            .write()
            .unwrap()
            .insert(url.to_string(), body.into());
    }

    /// Make every fetch fail as if the upstream were unreachable
    pub fn set_failure(&self, fail: bool) {
        *self.failure.write().unwrap() = fail;
    }

    /// URLs fetched, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UpstreamFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<Body, ProxyError> {
        self.requests.write().unwrap().push(url.to_string());

        if *self.failure.read().unwrap() {
            return Err(ProxyError::UpstreamFetch("mock outage".to_string()));
        }
        self.resources
            .read()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .map(Body::from)
            .ok_or_else(|| ProxyError::UpstreamFetch("upstream returned 404 Not Found".to_string()))
    }
}

#[derive(Debug, Clone)]
struct MockObject {
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct MockFileStore {
    objects: Arc<RwLock<HashMap<String, MockObject>>>,
    failure: Arc<RwLock<bool>>,
    opened: Arc<RwLock<Vec<String>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&self, path: &str, content_type: Option<&str>, bytes: impl Into<Vec<u8>>) {
        self.objects.write().unwrap().insert(
            path.to_string(),
            MockObject {
                content_type: content_type.map(str::to_string),
                bytes: bytes.into(),
            },
        );
    }

    /// Make every open fail with a storage error
    pub fn set_failure(&self, fail: bool) {
        *self.failure.write().unwrap() = fail;
    }

    /// Paths opened, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileStore for MockFileStore {
    async fn open(&self, path: &str) -> Result<Option<StoredObject>, StoreError> {
        self.opened.write().unwrap().push(path.to_string());

        if *self.failure.read().unwrap() {
            return Err(StoreError::Request("mock outage".to_string()));
        }
        Ok(self
            .objects
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .map(|object| StoredObject {
                name: path.to_string(),
                content_type: object.content_type,
                body: Body::from(object.bytes),
            }))
    }
}
