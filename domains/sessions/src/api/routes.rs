//! Route definitions for Sessions domain API

use axum::{middleware, routing::get, Router};

use super::handlers::{pages, session};
use super::middleware::{guard_entry, SessionsState};

/// Create session exchange routes
fn session_routes() -> Router<SessionsState> {
    Router::new().route(
        "/api/auth/session",
        get(session::get_session)
            .post(session::create_session)
            .delete(session::delete_session),
    )
}

/// Create guarded page entry routes
fn page_routes(state: SessionsState) -> Router<SessionsState> {
    Router::new()
        .route("/", get(pages::render_page))
        .route("/login", get(pages::render_page))
        .route("/signin", get(pages::render_page))
        .route("/dashboard", get(pages::render_page))
        .route("/inicio-externo", get(pages::render_page))
        .route("/todos-projetos", get(pages::render_page))
        .route("/detalhes-projeto", get(pages::render_page))
        .route("/detalhes-projeto/{identifier}", get(pages::render_page))
        .route_layer(middleware::from_fn_with_state(state, guard_entry))
}

/// Create all Sessions domain routes
pub fn routes(state: SessionsState) -> Router {
    Router::new()
        .merge(session_routes())
        .merge(page_routes(state.clone()))
        .with_state(state)
}
