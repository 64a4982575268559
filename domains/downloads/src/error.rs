//! Downloads domain errors
//!
//! Both enums keep the precise reason for the logs and convert into the
//! shared HTTP error, which only ever shows the caller a generic message.

use portal_common::Error;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("Resource not allowed: {0}")]
    Unauthorized(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Storage request failed: {0}")]
    Request(String),

    #[error("Storage response error: {0}")]
    Response(String),
}

impl From<ProxyError> for Error {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::MalformedUrl(detail) => {
                tracing::debug!(detail = %detail, "Rejected malformed proxy URL");
                Error::Validation("URL inválida".to_string())
            }
            ProxyError::InvalidPath(detail) => {
                tracing::debug!(detail = %detail, "Rejected blob path");
                Error::Validation("Path inválido".to_string())
            }
            ProxyError::Unauthorized(reason) => Error::ResourceDenied(reason),
            ProxyError::UpstreamFetch(detail) => Error::Upstream(detail),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidPath(detail) => {
                tracing::debug!(detail = %detail, "Rejected file path");
                Error::Validation("Caminho do arquivo inválido".to_string())
            }
            StoreError::Request(detail) | StoreError::Response(detail) => Error::Internal(detail),
        }
    }
}
