//! Resource proxy and file retrieval through the composed router

use axum::http::{header, StatusCode};

use crate::common::{json_body, raw_body, TestApp};

fn proxy_uri(url: &str) -> String {
    format!("/api/downloads/proxy?url={}", urlencoding::encode(url))
}

#[tokio::test]
async fn test_allowlisted_resource_is_fetched() {
    let app = TestApp::new();
    let url = "https://xyz.public.blob.vercel-storage.com/documentos/report.pdf";
    app.fetcher.add_resource(url, b"report".to_vec());

    let response = app.get(&proxy_uri(url), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment"));
    assert_eq!(raw_body(response).await, b"report");
    assert_eq!(app.fetcher.requests(), vec![url]);
}

#[tokio::test]
async fn test_disallowed_resources_are_never_fetched() {
    let app = TestApp::new();

    for url in [
        "https://evil.example.com/documentos/report.pdf",
        "https://xyz.public.blob.vercel-storage.com/etc/passwd",
        "http://xyz.public.blob.vercel-storage.com/documentos/report.pdf",
        "https://169.254.169.254/documentos/report.pdf",
    ] {
        let response = app.get(&proxy_uri(url), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{url}");

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_ALLOWED", "{url}");
        assert_eq!(body["error"]["message"], "Recurso não permitido");
    }

    assert!(app.fetcher.requests().is_empty());
}

#[tokio::test]
async fn test_upstream_non_success_is_500() {
    let app = TestApp::new();
    let url = "https://xyz.public.blob.vercel-storage.com/compliance/missing.pdf";

    let response = app.get(&proxy_uri(url), None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.fetcher.requests(), vec![url]);
}

#[tokio::test]
async fn test_file_retrieval_by_path() {
    let app = TestApp::new();
    app.store
        .add_object("recibosProponente/p9/recibo.pdf", Some("application/pdf"), b"r".to_vec());

    let response = app
        .get("/api/downloads/file?filePath=recibosProponente%2Fp9%2Frecibo.pdf", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"recibo.pdf\""
    );

    let response = app
        .get("/api/downloads/file?filePath=recibosProponente%2Fp9%2Foutro.pdf", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
