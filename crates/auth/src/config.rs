//! Authentication configuration

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for session artifacts
    pub session_secret: String,
    /// Identity provider project (ID token audience)
    pub project_id: String,
    /// Registry database name inside the project
    pub firestore_database: String,
    /// Bearer token for the provider admin REST APIs
    pub admin_access_token: String,
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Log formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("project_id", &self.project_id)
            .field("firestore_database", &self.firestore_database)
            .finish_non_exhaustive()
    }
}
