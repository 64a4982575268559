//! Route definitions for Downloads domain API

use axum::{routing::get, Router};

use super::handlers::{files, proxy};
use super::middleware::DownloadsState;

/// Create all Downloads domain API routes
pub fn routes() -> Router<DownloadsState> {
    Router::new()
        .route("/api/downloads/proxy", get(proxy::proxy_resource))
        .route("/api/downloads/blob", get(proxy::blob_resource))
        .route("/api/downloads/file", get(files::download_file))
}
