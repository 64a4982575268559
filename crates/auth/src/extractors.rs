//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! Both extractors are infallible: a missing or broken session cookie is the
//! anonymous state, not a rejection.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::access::Access;
use crate::backend::AuthBackend;
use crate::claims::IdentityClaim;
use crate::session::SESSION_COOKIE;

fn session_artifact(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Verified identity behind the session cookie, if any
#[derive(Debug)]
pub struct SessionUser(pub Option<IdentityClaim>);

impl<S> FromRequestParts<S> for SessionUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let artifact = session_artifact(parts);

        Ok(SessionUser(backend.verify_session(artifact.as_deref()).await))
    }
}

/// Access tier of the caller, computed fresh for this request
#[derive(Debug)]
pub struct CurrentAccess(pub Access);

impl<S> FromRequestParts<S> for CurrentAccess
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);
        let artifact = session_artifact(parts);

        Ok(CurrentAccess(backend.authenticate(artifact.as_deref()).await))
    }
}
