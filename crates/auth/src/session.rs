//! Session artifact minting and validation
//!
//! A session artifact is an HS256 JWT signed with the service's own secret.
//! Its lifetime is fixed at [`SESSION_LIFETIME_DAYS`] regardless of how long
//! the provider's ID token would have lived.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{IdentityClaim, SessionClaims};
use crate::error::{SessionError, VerifyError};

/// Cookie that carries the session artifact
pub const SESSION_COOKIE: &str = "session";

/// Fixed session lifetime
pub const SESSION_LIFETIME_DAYS: i64 = 5;

const SESSION_ISSUER: &str = "portal-fcsn/session";

/// Session lifetime as a duration
pub fn session_lifetime() -> Duration {
    Duration::days(SESSION_LIFETIME_DAYS)
}

/// Opaque session artifact handed to the caller.
///
/// `Debug` is redacted so the artifact cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionArtifact(String);

impl SessionArtifact {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SessionArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionArtifact(<redacted>)")
    }
}

/// Result of a successful login exchange
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub artifact: SessionArtifact,
    pub subject_id: String,
    pub expires_at: i64,
}

/// Signing and verification keys for session artifacts
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint an artifact for a verified claim.
    ///
    /// Claims whose email is not verified never get an artifact.
    pub(crate) fn mint(
        &self,
        claim: &IdentityClaim,
        auth_time: i64,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionError> {
        if !claim.email_verified {
            return Err(SessionError::InvalidCredential);
        }

        let iat = now.timestamp();
        let exp = (now + session_lifetime()).timestamp();

        let claims = SessionClaims {
            sub: claim.subject_id.clone(),
            email: claim.email.clone(),
            email_verified: claim.email_verified,
            auth_time,
            iat,
            exp,
            iss: SESSION_ISSUER.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session artifact");
            SessionError::IssueFailed
        })?;

        Ok(IssuedSession {
            artifact: SessionArtifact(token),
            subject_id: claims.sub,
            expires_at: exp,
        })
    }

    /// Verify signature, issuer and expiry of an artifact.
    ///
    /// `jsonwebtoken` only enforces `exp`, `nbf`, `aud`, `iss` and `sub` as
    /// required claims; `iat` is enforced by `SessionClaims` deserialization.
    pub(crate) fn decode(&self, artifact: &str) -> Result<SessionClaims, VerifyError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[SESSION_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        validation.leeway = 0;

        let data = decode::<SessionClaims>(artifact, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
