//! Portal application composition root
//!
//! Composes the domain routers into a single application and owns the
//! shared HTTP layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use portal_auth::{AuthBackend, AuthConfig};
use portal_common::Config;
use portal_downloads::{DownloadsState, GcsFileStore, HttpFetcher, ResourceProxyPolicy};
use portal_sessions::SessionsState;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Timeout for the identity provider, registry and storage APIs
const ADMIN_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest accepted request body. Only the login exchange carries one.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let http = reqwest::Client::builder()
        .timeout(ADMIN_API_TIMEOUT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let auth_config = AuthConfig {
        session_secret: config.session_secret.clone(),
        project_id: config.firebase_project_id.clone(),
        firestore_database: config.firestore_database.clone(),
        admin_access_token: config.google_access_token.clone(),
    };
    let auth = AuthBackend::firebase(auth_config, http.clone());

    let fetcher = HttpFetcher::new(Duration::from_secs(config.proxy_timeout_secs))
        .map_err(|e| anyhow::anyhow!("Failed to build proxy client: {}", e))?;
    let store = GcsFileStore::new(
        http,
        config.storage_bucket.clone(),
        config.google_access_token.clone(),
    );

    let downloads = DownloadsState {
        policy: ResourceProxyPolicy::portal(),
        fetcher: Arc::new(fetcher),
        store: Arc::new(store),
    };

    Ok(build_router(auth, downloads, config.is_production()))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(auth: AuthBackend, downloads: DownloadsState, secure_cookies: bool) -> Router {
    let sessions = SessionsState {
        auth,
        secure_cookies,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(portal_sessions::routes(sessions))
        .merge(portal_downloads::routes().with_state(downloads))
}

/// CORS for a comma-separated origin list. Credentials are allowed so the
/// session cookie travels with cross-origin calls.
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Shared HTTP layers for both runtimes.
///
/// The body limit sits innermost on its own: `CorsLayer` needs an inner
/// response body implementing `Default`, which the limit's body does not.
pub fn with_http_layers(app: Router, cors: CorsLayer) -> Router {
    app.layer(body_limit_layer()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .into_inner(),
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
