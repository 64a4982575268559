//! Entry-point routing
//!
//! The one tier → destination table for every page entry point. Page guards
//! call [`resolve_route`]; nothing else maps tiers to routes.

use crate::access::AccessTier;

pub const HOME_ROUTE: &str = "/";
pub const SIGN_IN_ROUTE: &str = "/login";
pub const REGISTRATION_ROUTE: &str = "/signin";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const EXTERNAL_HOME_ROUTE: &str = "/inicio-externo";

/// Page entry points subject to routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `/`, the privileged landing page
    Root,
    /// `/login`
    SignIn,
    /// `/signin` (account registration), public like sign-in
    Registration,
    /// `/dashboard`
    Dashboard,
    /// `/inicio-externo`
    ExternalHome,
    /// `/todos-projetos`, `/detalhes-projeto` and project detail pages
    AdminArea,
}

impl EntryPoint {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            HOME_ROUTE => Some(EntryPoint::Root),
            SIGN_IN_ROUTE => Some(EntryPoint::SignIn),
            REGISTRATION_ROUTE => Some(EntryPoint::Registration),
            DASHBOARD_ROUTE => Some(EntryPoint::Dashboard),
            EXTERNAL_HOME_ROUTE => Some(EntryPoint::ExternalHome),
            "/todos-projetos" | "/detalhes-projeto" => Some(EntryPoint::AdminArea),
            p if p.starts_with("/detalhes-projeto/") => Some(EntryPoint::AdminArea),
            _ => None,
        }
    }

    fn is_public(self) -> bool {
        matches!(self, EntryPoint::SignIn | EntryPoint::Registration)
    }

    fn permits(self, tier: AccessTier) -> bool {
        match self {
            EntryPoint::Root | EntryPoint::AdminArea => tier == AccessTier::InternalAdmin,
            EntryPoint::Dashboard => tier >= AccessTier::Internal,
            EntryPoint::ExternalHome => tier == AccessTier::External,
            EntryPoint::SignIn | EntryPoint::Registration => false,
        }
    }
}

/// What an entry point should do for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(&'static str),
}

/// Landing page for a tier
pub fn home_route(tier: AccessTier) -> &'static str {
    match tier {
        AccessTier::External => EXTERNAL_HOME_ROUTE,
        AccessTier::Internal => DASHBOARD_ROUTE,
        AccessTier::InternalAdmin => HOME_ROUTE,
    }
}

/// `tier = None` means the caller must authenticate.
pub fn resolve_route(tier: Option<AccessTier>, entry: EntryPoint) -> RouteDecision {
    match tier {
        None if entry.is_public() => RouteDecision::Render,
        None => RouteDecision::Redirect(SIGN_IN_ROUTE),
        Some(tier) if entry.permits(tier) => RouteDecision::Render,
        Some(tier) => RouteDecision::Redirect(home_route(tier)),
    }
}
