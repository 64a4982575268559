//! Owned file store
//!
//! `GcsFileStore` reads objects from the portal's Cloud Storage bucket
//! through the JSON API: one metadata request, then the media stream.

use axum::body::Body;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::StoreError;

const STORAGE_API_URL: &str = "https://storage.googleapis.com/storage/v1";

/// An object opened for download
pub struct StoredObject {
    /// Full object path within the bucket
    pub name: String,
    pub content_type: Option<String>,
    pub body: Body,
}

#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// `Ok(None)` when no object exists at `path`
    async fn open(&self, path: &str) -> Result<Option<StoredObject>, StoreError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata {
    name: String,
    content_type: Option<String>,
}

#[derive(Clone)]
pub struct GcsFileStore {
    http: Client,
    bucket: String,
    access_token: String,
}

impl std::fmt::Debug for GcsFileStore {
    #[mutants::skip] // Log formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcsFileStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl GcsFileStore {
    pub fn new(http: Client, bucket: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            bucket: bucket.into(),
            access_token: access_token.into(),
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/b/{}/o/{}",
            STORAGE_API_URL,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(path)
        )
    }
}

#[async_trait::async_trait]
impl FileStore for GcsFileStore {
    async fn open(&self, path: &str) -> Result<Option<StoredObject>, StoreError> {
        let object_url = self.object_url(path);

        let response = self
            .http
            .get(&object_url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("metadata request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Response(format!(
                "metadata request returned {}",
                response.status()
            )));
        }

        let metadata: ObjectMetadata = response
            .json()
            .await
            .map_err(|e| StoreError::Response(format!("failed to parse metadata: {}", e)))?;

        let media = self
            .http
            .get(&object_url)
            .query(&[("alt", "media")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("media request failed: {}", e)))?;

        // Deleted between the two requests
        if media.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !media.status().is_success() {
            return Err(StoreError::Response(format!(
                "media request returned {}",
                media.status()
            )));
        }

        tracing::debug!(object = %metadata.name, "Opened stored object");

        Ok(Some(StoredObject {
            name: metadata.name,
            content_type: metadata.content_type,
            body: Body::from_stream(media.bytes_stream()),
        }))
    }
}
