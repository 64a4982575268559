//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::errors::ErrorKind;
use serde_json::json;

/// Why a credential (ID token or session artifact) failed verification.
///
/// Never crosses the HTTP boundary: the session issuer maps it to
/// `SessionError::InvalidCredential` and the credential verifier maps it
/// to "no identity".
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("malformed credential: {0}")]
    Malformed(String),

    #[error("credential expired")]
    Expired,

    #[error("signature mismatch")]
    InvalidSignature,

    #[error("credential rejected: {0}")]
    Invalid(String),

    #[error("session revoked by identity provider")]
    Revoked,

    #[error("identity provider unavailable: {0}")]
    Provider(String),
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => VerifyError::Malformed(e.to_string()),
            _ => VerifyError::Invalid(e.to_string()),
        }
    }
}

/// Registry lookup failure
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("registry transport error: {0}")]
    Transport(String),

    #[error("registry response error: {0}")]
    Response(String),
}

/// Session issuance error
#[derive(Debug)]
pub enum SessionError {
    MissingToken,
    MissingEmail,
    InvalidCredential,
    IssueFailed,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            SessionError::MissingToken => (
                StatusCode::BAD_REQUEST,
                "MISSING_TOKEN",
                "ID token não informado.",
            ),
            SessionError::MissingEmail => (
                StatusCode::BAD_REQUEST,
                "EMAIL_UNAVAILABLE",
                "Email não disponível no token.",
            ),
            SessionError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIAL",
                "Falha ao criar sessão.",
            ),
            SessionError::IssueFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_ERROR",
                "Falha ao criar sessão.",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
