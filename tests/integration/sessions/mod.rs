//! Session exchange, query and termination

use axum::http::{Request, StatusCode};
use axum::body::Body;
use chrono::Utc;

use crate::common::{
    json_body, mint_artifact, session_cookie, session_set_cookie, TestApp, TEST_SESSION_SECRET,
};

mod test_session_exchange {
    use super::*;

    #[tokio::test]
    async fn test_login_sets_hardened_cookie() {
        let app = TestApp::with_secure_cookies(true);
        app.provider.register_token(
            "tok",
            portal_auth::mock::verified_claim("uid-1", "ana@csn.com.br"),
        );

        let response = app.login("tok").await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = session_set_cookie(&response).unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=432000"));

        assert_eq!(json_body(response).await["status"], "success");
    }

    #[tokio::test]
    async fn test_rejected_token_sets_no_cookie() {
        let app = TestApp::new();

        let response = app.login("never-issued").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&response).is_none());
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_missing_token_is_400() {
        let app = TestApp::new();

        let response = app.login("").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(session_cookie(&response).is_none());
    }
}

mod test_session_query {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_reproduces_identity() {
        let app = TestApp::new();
        let cookie = app.sign_in("uid-7", "bruno@csn.com.br").await;

        let response = app.get("/api/auth/session", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["user"]["subject_id"], "uid-7");
        assert_eq!(body["user"]["email"], "bruno@csn.com.br");
        assert_eq!(body["user"]["email_verified"], true);
    }

    #[tokio::test]
    async fn test_bad_artifacts_yield_null_user() {
        let app = TestApp::new();
        let now = Utc::now().timestamp();

        let foreign = mint_artifact("some-other-secret-0123456789abcdef", "uid", "a@csn.com.br", now, now + 3600);
        let expired = mint_artifact(TEST_SESSION_SECRET, "uid", "a@csn.com.br", now - 7200, now - 3600);

        for cookie in [
            "session=garbage".to_string(),
            "session=".to_string(),
            format!("session={foreign}"),
            format!("session={expired}"),
        ] {
            let response = app.get("/api/auth/session", Some(&cookie)).await;
            assert_eq!(response.status(), StatusCode::OK, "{cookie}");
            assert!(json_body(response).await["user"].is_null(), "{cookie}");
        }

        let response = app.get("/api/auth/session", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["user"].is_null());
    }

    #[tokio::test]
    async fn test_revoked_subject_loses_session() {
        let app = TestApp::new();
        let cookie = app.sign_in("uid-9", "carla@csn.com.br").await;

        app.provider.revoke("uid-9");

        let response = app.get("/api/auth/session", Some(&cookie)).await;
        assert!(json_body(response).await["user"].is_null());
    }

    #[tokio::test]
    async fn test_revocation_outage_fails_closed() {
        let app = TestApp::new();
        let cookie = app.sign_in("uid-10", "davi@csn.com.br").await;

        app.provider.set_revocation_failure(true);

        let response = app.get("/api/auth/session", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["user"].is_null());
    }
}

mod test_session_termination {
    use super::*;

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let app = TestApp::new();
        let cookie = app.sign_in("uid-11", "elis@csn.com.br").await;

        for attempt in 0..3 {
            let mut request = Request::delete("/api/auth/session");
            if attempt == 0 {
                request = request.header(axum::http::header::COOKIE, &cookie);
            }
            let response = app.send(request.body(Body::empty()).unwrap()).await;

            assert_eq!(response.status(), StatusCode::OK);
            let removal = session_set_cookie(&response).unwrap();
            assert!(removal.contains("Max-Age=0"), "{removal}");
            assert_eq!(json_body(response).await["status"], "success");
        }
    }
}
