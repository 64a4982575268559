//! Session API handlers
//!
//! Implements:
//! - POST /api/auth/session — Exchange an ID token for a session cookie
//! - GET /api/auth/session — Return the identity behind the session cookie
//! - DELETE /api/auth/session — Clear the session cookie

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use portal_auth::{
    IdentityClaim, SessionArtifact, SessionError, SessionUser, SESSION_COOKIE,
    SESSION_LIFETIME_DAYS,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::SessionsState;

/// Login exchange body. No `Debug`: the token must never reach the logs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub id_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    fn success() -> Self {
        Self { status: "success" }
    }
}

/// Response shape for `GET /api/auth/session`
#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub user: Option<IdentityClaim>,
}

fn session_cookie(artifact: SessionArtifact, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, artifact.into_inner()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(SESSION_LIFETIME_DAYS))
        .build()
}

fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

/// POST /api/auth/session — Exchange an ID token for a session cookie
pub async fn create_session(
    State(state): State<SessionsState>,
    jar: CookieJar,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<StatusResponse>), SessionError> {
    let id_token = payload
        .ok()
        .and_then(|Json(body)| body.id_token)
        .ok_or(SessionError::MissingToken)?;

    let issued = state.auth.issue_session(&id_token).await?;
    let jar = jar.add(session_cookie(issued.artifact, state.secure_cookies));

    Ok((jar, Json(StatusResponse::success())))
}

/// GET /api/auth/session — Return the identity behind the session cookie
pub async fn get_session(SessionUser(user): SessionUser) -> Json<SessionUserResponse> {
    Json(SessionUserResponse { user })
}

/// DELETE /api/auth/session — Clear the session cookie (idempotent)
pub async fn delete_session(
    State(state): State<SessionsState>,
    jar: CookieJar,
) -> (CookieJar, Json<StatusResponse>) {
    let jar = jar.add(removal_cookie(state.secure_cookies));
    (jar, Json(StatusResponse::success()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_auth::mock::{verified_claim, MockAdminRegistry, MockIdentityProvider};
    use portal_auth::{AuthBackend, AuthConfig};
    use std::sync::Arc;

    async fn test_artifact() -> SessionArtifact {
        let provider = MockIdentityProvider::new();
        provider.register_token("tok", verified_claim("uid", "ana@csn.com.br"));
        let backend = AuthBackend::new(
            AuthConfig {
                session_secret: "cookie-test-secret-0123456789abcd".to_string(),
                project_id: "portal-fcsn".to_string(),
                firestore_database: "(default)".to_string(),
                admin_access_token: "unused".to_string(),
            },
            Arc::new(provider),
            Arc::new(MockAdminRegistry::new()),
        );

        backend.issue_session("tok").await.unwrap().artifact
    }

    #[tokio::test]
    async fn test_session_cookie_attributes() {
        let cookie = session_cookie(test_artifact().await, true);

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(5)));
    }

    #[tokio::test]
    async fn test_cookie_not_secure_outside_production() {
        let cookie = session_cookie(test_artifact().await, false);
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(false);
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_request_accepts_camel_case_token() {
        let body: CreateSessionRequest =
            serde_json::from_str(r#"{"idToken":"eyJhbGciOi"}"#).unwrap();
        assert_eq!(body.id_token.as_deref(), Some("eyJhbGciOi"));

        let empty: CreateSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.id_token.is_none());
    }
}
