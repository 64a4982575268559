//! File retrieval by path
//!
//! Implements:
//! - GET /api/downloads/file?filePath= — Download an object from the owned store

use axum::{extract::State, http::HeaderValue, response::Response};
use portal_common::{Error, ValidatedQuery};
use serde::Deserialize;
use validator::Validate;

use super::attachment;
use crate::api::middleware::DownloadsState;
use crate::domain::storage_object_path;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileParams {
    /// Raw object path or a previously issued download URL
    #[validate(length(min = 1, message = "filePath é obrigatório"))]
    pub file_path: String,
}

/// GET /api/downloads/file — Download a stored object as an attachment
pub async fn download_file(
    State(state): State<DownloadsState>,
    ValidatedQuery(params): ValidatedQuery<FileParams>,
) -> Result<Response, Error> {
    let path = storage_object_path(&params.file_path)?;

    let object = state
        .store
        .open(&path)
        .await?
        .ok_or_else(|| Error::NotFound("Arquivo não encontrado".to_string()))?;

    tracing::info!(object = %object.name, "Serving stored object");

    let content_type = object
        .content_type
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

    attachment(content_type, &object.name, object.body)
}
