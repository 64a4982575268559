//! Sessions domain state and the page entry guard

use axum::{
    extract::{FromRef, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use portal_auth::{resolve_route, AuthBackend, CurrentAccess, EntryPoint, RouteDecision};

/// Application state for the Sessions domain
#[derive(Clone)]
pub struct SessionsState {
    pub auth: AuthBackend,
    /// Mark the session cookie `Secure` (production)
    pub secure_cookies: bool,
}

impl FromRef<SessionsState> for AuthBackend {
    fn from_ref(state: &SessionsState) -> Self {
        state.auth.clone()
    }
}

/// Verify → classify → route for every page entry point.
///
/// Rendered requests carry the computed `Access` as a request extension so
/// page handlers never re-derive it.
pub async fn guard_entry(
    CurrentAccess(access): CurrentAccess,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(entry) = EntryPoint::from_path(request.uri().path()) else {
        return next.run(request).await;
    };

    match resolve_route(access.tier(), entry) {
        RouteDecision::Render => {
            request.extensions_mut().insert(access);
            next.run(request).await
        }
        RouteDecision::Redirect(location) => {
            tracing::debug!(
                path = %request.uri().path(),
                location = location,
                "Entry point redirect"
            );
            Redirect::temporary(location).into_response()
        }
    }
}
