//! Resource proxy handlers
//!
//! Implements:
//! - GET /api/downloads/proxy?url= — Fetch an allowlisted absolute URL
//! - GET /api/downloads/blob?path= — Fetch `<folder>/<file>` from the portal blob store

use axum::{
    extract::State,
    http::HeaderValue,
    response::Response,
};
use portal_common::{Error, ValidatedQuery};
use reqwest::Url;
use serde::Deserialize;
use validator::Validate;

use super::attachment;
use crate::api::middleware::DownloadsState;
use crate::domain::{blob_url, url_filename};

#[derive(Debug, Deserialize, Validate)]
pub struct ProxyParams {
    #[validate(length(min = 1, message = "url é obrigatório"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BlobParams {
    #[validate(length(min = 1, message = "path é obrigatório"))]
    pub path: String,
}

/// GET /api/downloads/proxy — Fetch an allowlisted resource as an attachment
pub async fn proxy_resource(
    State(state): State<DownloadsState>,
    ValidatedQuery(params): ValidatedQuery<ProxyParams>,
) -> Result<Response, Error> {
    let url = state.policy.authorize(&params.url)?;
    fetch_attachment(&state, url).await
}

/// GET /api/downloads/blob — Fetch a blob-store path as an attachment
pub async fn blob_resource(
    State(state): State<DownloadsState>,
    ValidatedQuery(params): ValidatedQuery<BlobParams>,
) -> Result<Response, Error> {
    let url = blob_url(&params.path)?;
    let url = state.policy.authorize(url.as_str())?;
    fetch_attachment(&state, url).await
}

/// Upstream content type and filename are never forwarded.
async fn fetch_attachment(state: &DownloadsState, url: Url) -> Result<Response, Error> {
    tracing::info!(
        host = url.host_str().unwrap_or_default(),
        path = %url.path(),
        "Proxying resource"
    );

    let filename = url_filename(&url);
    let body = state.fetcher.fetch(&url).await?;

    attachment(
        HeaderValue::from_static("application/octet-stream"),
        &filename,
        body,
    )
}
