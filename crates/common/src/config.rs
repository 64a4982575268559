//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. The internal-domain and
//! download allowlists are code constants and are not read from here.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Runtime environment (`production` enables secure cookies)
    pub app_env: String,

    /// Secret used to sign session artifacts
    pub session_secret: String,

    /// Identity provider / document store project
    pub firebase_project_id: String,
    pub firestore_database: String,
    /// Bearer token for the provider admin REST APIs
    pub google_access_token: String,

    /// Owned file store bucket
    pub storage_bucket: String,

    /// Outbound fetch timeout for the download proxy
    pub proxy_timeout_secs: u64,

    /// Runtime configuration
    pub cors_allowed_origins: Option<String>,
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("firebase_project_id", &self.firebase_project_id)
            .field("firestore_database", &self.firestore_database)
            .field("storage_bucket", &self.storage_bucket)
            .field("proxy_timeout_secs", &self.proxy_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let config = Self {
            app_env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),

            session_secret: required("SESSION_SECRET")?,

            firebase_project_id: required("FIREBASE_PROJECT_ID")?,
            firestore_database: lookup("FIRESTORE_DATABASE")
                .unwrap_or_else(|| "(default)".to_string()),
            google_access_token: required("GOOGLE_ACCESS_TOKEN")?,

            storage_bucket: required("STORAGE_BUCKET")?,

            proxy_timeout_secs: parse_or(&lookup, "PROXY_TIMEOUT_SECS", 30)?,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "portal=debug".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
        };

        if config.session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 bytes");
        }

        Ok(config)
    }

    /// Whether cookies must carry the `Secure` attribute
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

/// Parse an optional variable, failing when it is set but unparseable
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} is invalid ({:?}): {}", key, value, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("SESSION_SECRET", "0123456789abcdef0123456789abcdef".to_string()),
            ("FIREBASE_PROJECT_ID", "portal-fcsn".to_string()),
            ("GOOGLE_ACCESS_TOKEN", "ya29.test".to_string()),
            ("STORAGE_BUCKET", "portal-fcsn.appspot.com".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<Config> {
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.app_env, "development");
        assert_eq!(config.firestore_database, "(default)");
        assert_eq!(config.proxy_timeout_secs, 30);
        assert_eq!(config.port, 3000);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_required_var_fails() {
        let mut env = base_env();
        env.remove("FIREBASE_PROJECT_ID");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("FIREBASE_PROJECT_ID is required"));
    }

    #[test]
    fn test_short_session_secret_rejected() {
        let mut env = base_env();
        env.insert("SESSION_SECRET", "short".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_production_flag() {
        let mut env = base_env();
        env.insert("APP_ENV", "production".to_string());
        env.insert("PROXY_TIMEOUT_SECS", "5".to_string());
        let config = load(&env).unwrap();
        assert!(config.is_production());
        assert_eq!(config.proxy_timeout_secs, 5);
    }

    #[test]
    fn test_unparseable_port_rejected() {
        let mut env = base_env();
        env.insert("PORT", "80a".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("PORT is invalid"));

        env.insert("PORT", "70000".to_string());
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_unparseable_proxy_timeout_rejected() {
        let mut env = base_env();
        env.insert("PROXY_TIMEOUT_SECS", "30s".to_string());
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("PROXY_TIMEOUT_SECS is invalid"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&base_env()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(!rendered.contains("ya29.test"));
    }
}
