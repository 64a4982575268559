//! Resource proxy allowlist
//!
//! A caller-supplied URL is fetched only if [`ResourceProxyPolicy::authorize`]
//! accepts it. The matcher is pure: no DNS, no I/O.

use reqwest::Url;

use crate::error::ProxyError;

/// Hosts the proxy may reach. Each entry starts with a dot, so the bare
/// suffix itself never matches.
pub const ALLOWED_HOST_SUFFIXES: &[&str] = &[".public.blob.vercel-storage.com"];

/// First path segment of every fetchable resource
pub const ALLOWED_FOLDERS: &[&str] = &[
    "apresentacao",
    "compliance",
    "diario",
    "docsAdmin",
    "documentos",
    "recibosProponente",
];

/// Percent-escapes that could smuggle a separator or dot-segment past the
/// folder check once decoded upstream
const ENCODED_SEPARATORS: &[&str] = &["%2e", "%2f", "%5c"];

/// Immutable allowlist. Both sets are non-empty, so an empty policy cannot
/// be built and accidentally allow everything or nothing.
#[derive(Debug, Clone, Copy)]
pub struct ResourceProxyPolicy {
    allowed_host_suffixes: &'static [&'static str],
    allowed_folders: &'static [&'static str],
}

impl ResourceProxyPolicy {
    pub fn new(
        allowed_host_suffixes: &'static [&'static str],
        allowed_folders: &'static [&'static str],
    ) -> Option<Self> {
        if allowed_host_suffixes.is_empty() || allowed_folders.is_empty() {
            return None;
        }
        Some(Self {
            allowed_host_suffixes,
            allowed_folders,
        })
    }

    /// The portal's fixed policy
    pub fn portal() -> Self {
        Self {
            allowed_host_suffixes: ALLOWED_HOST_SUFFIXES,
            allowed_folders: ALLOWED_FOLDERS,
        }
    }

    pub fn allows_host(&self, host: &str) -> bool {
        self.allowed_host_suffixes
            .iter()
            .any(|suffix| host.len() > suffix.len() && host.ends_with(suffix))
    }

    pub fn allows_folder(&self, folder: &str) -> bool {
        self.allowed_folders.contains(&folder)
    }

    /// Parse `raw` and check it against the allowlist.
    ///
    /// Returns the parsed URL to fetch. Every rejection reason is for logs
    /// only.
    pub fn authorize(&self, raw: &str) -> Result<Url, ProxyError> {
        let url = Url::parse(raw).map_err(|e| ProxyError::MalformedUrl(e.to_string()))?;

        if url.scheme() != "https" {
            return Err(ProxyError::Unauthorized(format!(
                "scheme {} not allowed",
                url.scheme()
            )));
        }

        if !url.username().is_empty() || url.password().is_some() {
            return Err(ProxyError::Unauthorized("userinfo not allowed".to_string()));
        }

        if url.port().is_some() {
            return Err(ProxyError::Unauthorized("explicit port not allowed".to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ProxyError::Unauthorized("missing host".to_string()))?;
        if is_ip_literal(host) {
            return Err(ProxyError::Unauthorized(format!("IP host {host} not allowed")));
        }
        if !self.allows_host(host) {
            return Err(ProxyError::Unauthorized(format!("host {host} not allowlisted")));
        }

        let path = url.path().to_ascii_lowercase();
        if ENCODED_SEPARATORS.iter().any(|escape| path.contains(escape)) {
            return Err(ProxyError::Unauthorized(
                "encoded separator in path".to_string(),
            ));
        }

        let folder = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default();
        if !self.allows_folder(folder) {
            return Err(ProxyError::Unauthorized(format!(
                "folder {folder:?} not allowlisted"
            )));
        }

        Ok(url)
    }
}

impl Default for ResourceProxyPolicy {
    fn default() -> Self {
        Self::portal()
    }
}

fn is_ip_literal(host: &str) -> bool {
    host.starts_with('[') || host.parse::<std::net::Ipv4Addr>().is_ok()
}
