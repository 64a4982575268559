//! HTTP handlers for the Downloads domain

pub mod files;
pub mod proxy;

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use portal_common::Error;

use crate::domain::attachment_disposition;

/// Binary download response. `content_type` must come from a trusted source.
fn attachment(content_type: HeaderValue, name: &str, body: Body) -> Result<Response, Error> {
    let disposition = HeaderValue::try_from(attachment_disposition(name))
        .map_err(|e| Error::Internal(format!("invalid Content-Disposition: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        body,
    )
        .into_response())
}
