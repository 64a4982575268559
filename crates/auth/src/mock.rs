//! Mock identity provider and admin registry
//!
//! Programmable fakes for the two external seams:
//! - `MockIdentityProvider`: known ID tokens, revoked subjects, outage switch
//! - `MockAdminRegistry`: admin emails, outage switch, lookup recording

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::claims::{IdentityClaim, VerifiedIdToken};
use crate::error::{LookupError, VerifyError};
use crate::provider::IdentityProvider;
use crate::registry::AdminRegistry;

/// Verified identity fixture
pub fn verified_claim(subject_id: &str, email: &str) -> IdentityClaim {
    let now = chrono::Utc::now().timestamp();
    IdentityClaim {
        subject_id: subject_id.to_string(),
        email: Some(email.to_string()),
        email_verified: true,
        issued_at: now,
        expires_at: now + 3600,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    tokens: Arc<RwLock<HashMap<String, VerifiedIdToken>>>,
    revoked: Arc<RwLock<HashSet<String>>>,
    revocation_failure: Arc<RwLock<bool>>,
    revocation_checks: Arc<RwLock<Vec<String>>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as an ID token for `claim`
    pub fn register_token(&self, token: &str, claim: IdentityClaim) {
        let auth_time = claim.issued_at;
        self.tokens
            .write()
            .unwrap()
            .insert(token.to_string(), VerifiedIdToken { claim, auth_time });
    }

    /// Revoke all sessions for a subject
    pub fn revoke(&self, subject_id: &str) {
        self.revoked.write().unwrap().insert(subject_id.to_string());
    }

    /// Make revocation checks fail with a provider error
    pub fn set_revocation_failure(&self, fail: bool) {
        *self.revocation_failure.write().unwrap() = fail;
    }

    /// Subjects checked for revocation, in order
    pub fn revocation_checks(&self) -> Vec<String> {
        self.revocation_checks.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedIdToken, VerifyError> {
        self.tokens
            .read()
            .unwrap()
            .get(id_token)
            .cloned()
            .ok_or(VerifyError::InvalidSignature)
    }

    async fn is_revoked(
        &self,
        subject_id: &str,
        _authenticated_at: i64,
    ) -> Result<bool, VerifyError> {
        self.revocation_checks
            .write()
            .unwrap()
            .push(subject_id.to_string());

        if *self.revocation_failure.read().unwrap() {
            return Err(VerifyError::Provider("mock outage".to_string()));
        }
        Ok(self.revoked.read().unwrap().contains(subject_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAdminRegistry {
    admins: Arc<RwLock<HashSet<String>>>,
    failure: Arc<RwLock<bool>>,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl MockAdminRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_admin(&self, email: &str) {
        self.admins.write().unwrap().insert(email.to_string());
    }

    /// Make lookups fail with a transport error
    pub fn set_failure(&self, fail: bool) {
        *self.failure.write().unwrap() = fail;
    }

    /// Emails looked up, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.read().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AdminRegistry for MockAdminRegistry {
    async fn is_admin(&self, email: &str) -> Result<bool, LookupError> {
        self.lookups.write().unwrap().push(email.to_string());

        if *self.failure.read().unwrap() {
            return Err(LookupError::Transport("mock outage".to_string()));
        }
        Ok(self.admins.read().unwrap().contains(email))
    }
}
