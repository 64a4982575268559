//! Authentication and access control for the portal
//!
//! Session issuance and verification, access tier classification and the
//! entry-point route table, plus axum extractors that work with any domain
//! state implementing `FromRef<S>` for `AuthBackend`.

mod access;
mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod provider;
mod registry;
mod routing;
mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use access::{
    classify_identity, email_domain, internal_tier, is_internal_domain, Access, AccessTier,
    Classification, INTERNAL_DOMAINS,
};
pub use backend::AuthBackend;
pub use claims::{IdentityClaim, VerifiedIdToken};
pub use config::AuthConfig;
pub use error::{LookupError, SessionError, VerifyError};
pub use extractors::{CurrentAccess, SessionUser};
pub use provider::{FirebaseIdentityProvider, IdentityProvider};
pub use registry::{lookup_admin, AdminRegistry, FirestoreRegistry};
pub use routing::{
    home_route, resolve_route, EntryPoint, RouteDecision, DASHBOARD_ROUTE, EXTERNAL_HOME_ROUTE,
    HOME_ROUTE, REGISTRATION_ROUTE, SIGN_IN_ROUTE,
};
pub use session::{
    session_lifetime, IssuedSession, SessionArtifact, SessionKeys, SESSION_COOKIE,
    SESSION_LIFETIME_DAYS,
};
