//! Administrator registry lookup
//!
//! Read-only query against the internal-user collection of the document
//! store. Callers go through [`lookup_admin`], which maps every failure to
//! "not admin".

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::LookupError;

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const INTERNAL_USERS_COLLECTION: &str = "usuarioInt";

#[async_trait::async_trait]
pub trait AdminRegistry: Send + Sync {
    /// Whether an entry with exactly this email is flagged as administrator
    async fn is_admin(&self, email: &str) -> Result<bool, LookupError>;
}

/// Fail-closed registry lookup: errors become `false`.
pub async fn lookup_admin(registry: &dyn AdminRegistry, email: &str) -> bool {
    match registry.is_admin(email).await {
        Ok(is_admin) => is_admin,
        Err(e) => {
            tracing::warn!(error = %e, "Admin registry lookup failed, treating as non-admin");
            false
        }
    }
}

/// One element of a `runQuery` response stream
#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<Value>,
}

/// Structured query: `email == <email> AND administrador == true`, limit 1
fn admin_query(email: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": INTERNAL_USERS_COLLECTION }],
            "where": {
                "compositeFilter": {
                    "op": "AND",
                    "filters": [
                        {
                            "fieldFilter": {
                                "field": { "fieldPath": "email" },
                                "op": "EQUAL",
                                "value": { "stringValue": email }
                            }
                        },
                        {
                            "fieldFilter": {
                                "field": { "fieldPath": "administrador" },
                                "op": "EQUAL",
                                "value": { "booleanValue": true }
                            }
                        }
                    ]
                }
            },
            "limit": 1
        }
    })
}

/// Firestore REST backed registry
#[derive(Clone)]
pub struct FirestoreRegistry {
    http: reqwest::Client,
    documents_url: String,
    access_token: String,
}

impl FirestoreRegistry {
    pub fn new(
        http: reqwest::Client,
        project_id: &str,
        database: &str,
        access_token: String,
    ) -> Self {
        Self {
            http,
            documents_url: format!(
                "{}/projects/{}/databases/{}/documents",
                FIRESTORE_URL, project_id, database
            ),
            access_token,
        }
    }
}

#[async_trait::async_trait]
impl AdminRegistry for FirestoreRegistry {
    async fn is_admin(&self, email: &str) -> Result<bool, LookupError> {
        let response = self
            .http
            .post(format!("{}:runQuery", self.documents_url))
            .bearer_auth(&self.access_token)
            .json(&admin_query(email))
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Response(format!("status {}", status)));
        }

        let items: Vec<RunQueryItem> = response
            .json()
            .await
            .map_err(|e| LookupError::Response(e.to_string()))?;

        Ok(items.iter().any(|item| item.document.is_some()))
    }
}
