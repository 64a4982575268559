//! Concrete authentication backend
//!
//! Wraps the identity provider, admin registry and session keys. Owns the
//! issue → verify → classify chain that every entry point goes through.

use std::sync::Arc;

use chrono::Utc;

use crate::access::{classify_identity, internal_tier, Access, AccessTier, Classification};
use crate::claims::IdentityClaim;
use crate::config::AuthConfig;
use crate::error::{SessionError, VerifyError};
use crate::provider::{FirebaseIdentityProvider, IdentityProvider};
use crate::registry::{lookup_admin, AdminRegistry, FirestoreRegistry};
use crate::session::{IssuedSession, SessionKeys};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    provider: Arc<dyn IdentityProvider>,
    registry: Arc<dyn AdminRegistry>,
    keys: SessionKeys,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(
        config: AuthConfig,
        provider: Arc<dyn IdentityProvider>,
        registry: Arc<dyn AdminRegistry>,
    ) -> Self {
        Self {
            keys: SessionKeys::from_secret(config.session_secret.as_bytes()),
            provider,
            registry,
            config,
        }
    }

    /// Backend wired to Firebase Auth and the Firestore registry
    pub fn firebase(config: AuthConfig, http: reqwest::Client) -> Self {
        let provider = FirebaseIdentityProvider::new(
            http.clone(),
            config.project_id.clone(),
            config.admin_access_token.clone(),
        );
        let registry = FirestoreRegistry::new(
            http,
            &config.project_id,
            &config.firestore_database,
            config.admin_access_token.clone(),
        );
        Self::new(config, Arc::new(provider), Arc::new(registry))
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Exchange a provider ID token for a session artifact.
    pub async fn issue_session(&self, id_token: &str) -> Result<IssuedSession, SessionError> {
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        let verified = self.provider.verify_id_token(id_token).await.map_err(|e| {
            tracing::info!(error = %e, "ID token rejected");
            SessionError::InvalidCredential
        })?;

        if verified.claim.email.is_none() {
            tracing::info!(subject = %verified.claim.subject_id, "ID token carries no email");
            return Err(SessionError::MissingEmail);
        }
        if !verified.claim.email_verified {
            tracing::info!(subject = %verified.claim.subject_id, "ID token email not verified");
            return Err(SessionError::InvalidCredential);
        }

        let issued = self
            .keys
            .mint(&verified.claim, verified.auth_time, Utc::now())?;

        tracing::info!(subject = %issued.subject_id, expires_at = issued.expires_at, "Session issued");
        Ok(issued)
    }

    /// Verify a presented artifact. Absent or invalid artifacts yield `None`.
    pub async fn verify_session(&self, artifact: Option<&str>) -> Option<IdentityClaim> {
        let artifact = artifact?;
        match self.try_verify_session(artifact).await {
            Ok(claim) => Some(claim),
            Err(e) => {
                tracing::debug!(error = %e, "Session artifact rejected");
                None
            }
        }
    }

    async fn try_verify_session(&self, artifact: &str) -> Result<IdentityClaim, VerifyError> {
        let claims = self.keys.decode(artifact)?;

        if self
            .provider
            .is_revoked(&claims.sub, claims.auth_time)
            .await?
        {
            return Err(VerifyError::Revoked);
        }

        Ok(claims.into_identity())
    }

    /// Classify an identity. Registry is only consulted for internal domains.
    pub async fn classify(&self, claim: Option<IdentityClaim>) -> Access {
        let tier = match classify_identity(claim.as_ref()) {
            Classification::Unauthenticated => return Access::Anonymous,
            Classification::External => AccessTier::External,
            Classification::Internal { email } => {
                internal_tier(lookup_admin(self.registry.as_ref(), email).await)
            }
        };

        match claim {
            Some(claim) => Access::Authenticated { claim, tier },
            None => Access::Anonymous,
        }
    }

    /// Full verify → classify chain for one request
    pub async fn authenticate(&self, artifact: Option<&str>) -> Access {
        let claim = self.verify_session(artifact).await;
        self.classify(claim).await
    }
}
