//! Common error types and handling for the portal API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for portal HTTP handlers
///
/// Variants that map to 5xx never expose their payload to the caller; the
/// detail is logged server-side and a generic message is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Request hit an allowlist. The reason is kept for logs only.
    #[error("Resource denied: {0}")]
    ResourceDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::ResourceDenied(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unexpected(_) | Error::Upstream(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::ResourceDenied(_) => "RESOURCE_NOT_ALLOWED",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Upstream(_) => "UPSTREAM_FETCH_FAILED",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message returned to the caller
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::NotFound(msg) => msg.clone(),
            Error::ResourceDenied(_) => "Recurso não permitido".to_string(),
            Error::Upstream(_) => "Erro ao buscar arquivo".to_string(),
            Error::Unexpected(_) | Error::Internal(_) => "Erro interno".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        match &self {
            Error::ResourceDenied(reason) => {
                tracing::warn!(reason = %reason, "Resource request denied");
            }
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "Internal server error");
            }
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
