//! Access tier classification
//!
//! The tier is derived on every request from the identity claim and, for
//! internal domains only, the admin registry. It is never stored or cached.

use serde::Serialize;

use crate::claims::IdentityClaim;

/// Email domains treated as internal. Compared case-sensitively.
pub const INTERNAL_DOMAINS: [&str; 3] = ["conpec.com.br", "csn.com.br", "fundacaocsn.org.br"];

/// Trust level, ordered `External < Internal < InternalAdmin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    External,
    Internal,
    InternalAdmin,
}

impl std::fmt::Display for AccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessTier::External => write!(f, "external"),
            AccessTier::Internal => write!(f, "internal"),
            AccessTier::InternalAdmin => write!(f, "internal_admin"),
        }
    }
}

/// First classification step, before any registry lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// No claim, unverified email, or no email at all
    Unauthenticated,
    External,
    /// Internal domain; the registry decides between Internal and InternalAdmin
    Internal { email: &'a str },
}

/// Substring after the last `@`, or `""` when there is none
pub fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("")
}

pub fn is_internal_domain(domain: &str) -> bool {
    INTERNAL_DOMAINS.contains(&domain)
}

pub fn classify_identity(claim: Option<&IdentityClaim>) -> Classification<'_> {
    let Some(claim) = claim else {
        return Classification::Unauthenticated;
    };
    if !claim.email_verified {
        return Classification::Unauthenticated;
    }
    let Some(email) = claim.email.as_deref() else {
        return Classification::Unauthenticated;
    };

    if is_internal_domain(email_domain(email)) {
        Classification::Internal { email }
    } else {
        Classification::External
    }
}

/// Final step for internal identities
pub fn internal_tier(is_admin: bool) -> AccessTier {
    if is_admin {
        AccessTier::InternalAdmin
    } else {
        AccessTier::Internal
    }
}

/// Outcome of the verify → classify chain for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Authenticated {
        claim: IdentityClaim,
        tier: AccessTier,
    },
}

impl Access {
    pub fn tier(&self) -> Option<AccessTier> {
        match self {
            Access::Anonymous => None,
            Access::Authenticated { tier, .. } => Some(*tier),
        }
    }

    pub fn claim(&self) -> Option<&IdentityClaim> {
        match self {
            Access::Anonymous => None,
            Access::Authenticated { claim, .. } => Some(claim),
        }
    }
}
