//! Identity and token claim types

use serde::{Deserialize, Serialize};

/// Verified facts about an authenticated principal.
///
/// Produced fresh on every request by the credential verifier and never
/// persisted. `email` is only present when the identity provider supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub email_verified: bool,
    /// Seconds since epoch
    pub issued_at: i64,
    /// Seconds since epoch
    pub expires_at: i64,
}

/// Payload of a session artifact (HS256 JWT signed by this service)
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SessionClaims {
    /// Subject (provider user ID)
    pub sub: String,
    pub email: Option<String>,
    pub email_verified: bool,
    /// When the user actually signed in at the provider
    pub auth_time: i64,
    /// Issued at
    pub iat: i64,
    /// Expires at
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl SessionClaims {
    pub(crate) fn into_identity(self) -> IdentityClaim {
        IdentityClaim {
            subject_id: self.sub,
            email: self.email,
            email_verified: self.email_verified,
            issued_at: self.iat,
            expires_at: self.exp,
        }
    }
}

/// ID token claims from the Firebase identity provider
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct IdTokenClaims {
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub iat: i64,
    pub exp: i64,
    pub auth_time: Option<i64>,
}

/// An ID token that passed provider verification
#[derive(Debug, Clone)]
pub struct VerifiedIdToken {
    pub claim: IdentityClaim,
    /// Provider sign-in time, used later for revocation checks
    pub auth_time: i64,
}

impl From<IdTokenClaims> for VerifiedIdToken {
    fn from(claims: IdTokenClaims) -> Self {
        let auth_time = claims.auth_time.unwrap_or(claims.iat);
        Self {
            claim: IdentityClaim {
                subject_id: claims.sub,
                email: claims.email,
                email_verified: claims.email_verified,
                issued_at: claims.iat,
                expires_at: claims.exp,
            },
            auth_time,
        }
    }
}
