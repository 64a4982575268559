//! Page entry handlers
//!
//! Only reached after `guard_entry` decided to render, so the `Access`
//! extension is always present.

use axum::{http::Uri, Extension, Json};
use portal_auth::{Access, AccessTier};
use serde::Serialize;

/// What a rendered page knows about the visitor
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub path: String,
    pub tier: Option<AccessTier>,
    pub email: Option<String>,
}

pub async fn render_page(Extension(access): Extension<Access>, uri: Uri) -> Json<PageContext> {
    let email = access.claim().and_then(|claim| claim.email.clone());

    Json(PageContext {
        path: uri.path().to_string(),
        tier: access.tier(),
        email,
    })
}
