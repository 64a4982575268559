//! Common test utilities and fixtures for integration tests
//!
//! - `TestApp`: the composed router wired to mocks
//! - Request helpers and session cookie extraction
//! - Artifact minting for tampered and expired session cases

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use portal_auth::mock::{verified_claim, MockAdminRegistry, MockIdentityProvider};
use portal_auth::{AuthBackend, AuthConfig};
use portal_downloads::mock::{MockFetcher, MockFileStore};
use portal_downloads::{DownloadsState, ResourceProxyPolicy};
use serde::Serialize;
use tower::ServiceExt;

pub const TEST_SESSION_SECRET: &str = "integration-session-secret-0123456789";

/// Composed application plus handles on every mock
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub provider: MockIdentityProvider,
    pub registry: MockAdminRegistry,
    pub fetcher: MockFetcher,
    pub store: MockFileStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_secure_cookies(false)
    }

    pub fn with_secure_cookies(secure_cookies: bool) -> Self {
        let provider = MockIdentityProvider::new();
        let registry = MockAdminRegistry::new();
        let fetcher = MockFetcher::new();
        let store = MockFileStore::new();

        let auth = AuthBackend::new(
            AuthConfig {
                session_secret: TEST_SESSION_SECRET.to_string(),
                project_id: "portal-fcsn".to_string(),
                firestore_database: "(default)".to_string(),
                admin_access_token: "unused".to_string(),
            },
            Arc::new(provider.clone()),
            Arc::new(registry.clone()),
        );
        let downloads = DownloadsState {
            policy: ResourceProxyPolicy::portal(),
            fetcher: Arc::new(fetcher.clone()),
            store: Arc::new(store.clone()),
        };

        Self {
            router: portal_app::build_router(auth, downloads, secure_cookies),
            provider,
            registry,
            fetcher,
            store,
        }
    }

    /// Register an ID token for `email` and exchange it for a session cookie
    pub async fn sign_in(&self, subject_id: &str, email: &str) -> String {
        let id_token = format!("id-token-{subject_id}");
        self.provider
            .register_token(&id_token, verified_claim(subject_id, email));

        let response = self.login(&id_token).await;
        assert!(response.status().is_success(), "login failed for {email}");
        session_cookie(&response).expect("login must set the session cookie")
    }

    pub async fn login(&self, id_token: &str) -> Response {
        let body = serde_json::json!({ "idToken": id_token }).to_string();
        self.send(
            Request::post("/api/auth/session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// `name=value` pair of the `session` cookie set by a response
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Full `Set-Cookie` header for the session cookie
pub fn session_set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .map(str::to_string)
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn raw_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[derive(Serialize)]
struct ArtifactClaims<'a> {
    sub: &'a str,
    email: &'a str,
    email_verified: bool,
    auth_time: i64,
    iat: i64,
    exp: i64,
    iss: &'a str,
}

/// Mint a session artifact by hand, bypassing the login exchange
pub fn mint_artifact(secret: &str, subject_id: &str, email: &str, issued_at: i64, expires_at: i64) -> String {
    let claims = ArtifactClaims {
        sub: subject_id,
        email,
        email_verified: true,
        auth_time: issued_at,
        iat: issued_at,
        exp: expires_at,
        iss: "portal-fcsn/session",
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
