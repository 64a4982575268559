//! Entry-point routing across access tiers

use axum::http::StatusCode;

use crate::common::{json_body, location, TestApp};

const GUARDED: [&str; 5] = [
    "/",
    "/dashboard",
    "/inicio-externo",
    "/todos-projetos",
    "/detalhes-projeto/abc123",
];

#[tokio::test]
async fn test_unauthenticated_visitor() {
    let app = TestApp::new();

    for path in GUARDED {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/login"), "{path}");
    }

    for path in ["/login", "/signin"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert!(json_body(response).await["tier"].is_null());
    }
}

#[tokio::test]
async fn test_external_domain_ignores_registry() {
    let app = TestApp::new();
    app.registry.add_admin("fora@gmail.com");
    let cookie = app.sign_in("ext-1", "fora@gmail.com").await;

    let response = app.get("/inicio-externo", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["tier"], "external");

    for path in ["/", "/dashboard", "/login", "/todos-projetos"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(location(&response), Some("/inicio-externo"), "{path}");
    }

    assert!(app.registry.lookups().is_empty());
}

#[tokio::test]
async fn test_internal_non_admin() {
    let app = TestApp::new();
    let cookie = app.sign_in("int-1", "gabi@fundacaocsn.org.br").await;

    let response = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["tier"], "internal");

    for path in ["/", "/inicio-externo", "/signin", "/detalhes-projeto/abc123"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(location(&response), Some("/dashboard"), "{path}");
    }
}

#[tokio::test]
async fn test_internal_admin() {
    let app = TestApp::new();
    app.registry.add_admin("hugo@csn.com.br");
    let cookie = app.sign_in("adm-1", "hugo@csn.com.br").await;

    for path in ["/", "/dashboard", "/todos-projetos", "/detalhes-projeto/abc123"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }

    let response = app.get("/", Some(&cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["tier"], "internal_admin");
    assert_eq!(body["email"], "hugo@csn.com.br");

    let response = app.get("/login", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_registry_outage_downgrades_to_internal() {
    let app = TestApp::new();
    app.registry.add_admin("iris@csn.com.br");
    let cookie = app.sign_in("adm-2", "iris@csn.com.br").await;

    app.registry.set_failure(true);

    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/dashboard"));
}
