//! Identity provider capability
//!
//! `IdentityProvider` is the seam between this service and the external
//! identity provider. `FirebaseIdentityProvider` talks to Firebase Auth over
//! REST; tests use `mock::MockIdentityProvider`.

use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;

use crate::claims::{IdTokenClaims, VerifiedIdToken};
use crate::error::VerifyError;

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const TOKEN_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a freshly issued ID token (signature, issuer, audience, expiry).
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdToken, VerifyError>;

    /// Whether the provider has revoked sessions for this subject that were
    /// authenticated at `authenticated_at` (seconds since epoch).
    async fn is_revoked(&self, subject_id: &str, authenticated_at: i64)
        -> Result<bool, VerifyError>;
}

/// Account record returned by the provider's admin lookup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderAccount {
    #[serde(default)]
    disabled: bool,
    /// Seconds since epoch, as a decimal string
    valid_since: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountLookupResponse {
    #[serde(default)]
    users: Vec<ProviderAccount>,
}

/// A missing or disabled account is revoked, as is any session that
/// authenticated before the account's `validSince` cut-off.
fn account_revoked(account: Option<&ProviderAccount>, authenticated_at: i64) -> bool {
    let Some(account) = account else {
        return true;
    };
    if account.disabled {
        return true;
    }
    account
        .valid_since
        .as_deref()
        .and_then(|v| v.parse::<i64>().ok())
        .is_some_and(|valid_since| authenticated_at < valid_since)
}

/// Firebase Auth backed identity provider
#[derive(Clone)]
pub struct FirebaseIdentityProvider {
    http: reqwest::Client,
    project_id: String,
    access_token: String,
}

impl FirebaseIdentityProvider {
    pub fn new(http: reqwest::Client, project_id: String, access_token: String) -> Self {
        Self {
            http,
            project_id,
            access_token,
        }
    }

    async fn fetch_signing_keys(&self) -> Result<JwkSet, VerifyError> {
        self.http
            .get(JWKS_URL)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VerifyError::Provider(e.to_string()))?
            .json::<JwkSet>()
            .await
            .map_err(|e| VerifyError::Provider(e.to_string()))
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdToken, VerifyError> {
        let header = decode_header(id_token)?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::Invalid(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| VerifyError::Malformed("missing key id".to_string()))?;

        let keys = self.fetch_signing_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| VerifyError::Invalid("unknown signing key".to_string()))?;
        let decoding_key = DecodingKey::from_jwk(jwk)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{}{}", TOKEN_ISSUER_PREFIX, self.project_id)]);
        validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);

        let data = decode::<IdTokenClaims>(id_token, &decoding_key, &validation)?;
        if data.claims.sub.is_empty() {
            return Err(VerifyError::Invalid("empty subject".to_string()));
        }

        Ok(data.claims.into())
    }

    async fn is_revoked(
        &self,
        subject_id: &str,
        authenticated_at: i64,
    ) -> Result<bool, VerifyError> {
        let url = format!(
            "{}/projects/{}/accounts:lookup",
            IDENTITY_TOOLKIT_URL, self.project_id
        );

        let response: AccountLookupResponse = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "localId": [subject_id] }))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VerifyError::Provider(e.to_string()))?
            .json()
            .await
            .map_err(|e| VerifyError::Provider(e.to_string()))?;

        Ok(account_revoked(response.users.first(), authenticated_at))
    }
}
