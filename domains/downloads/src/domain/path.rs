//! Download paths, storage download URLs and attachment filenames

use reqwest::Url;

use crate::error::{ProxyError, StoreError};

/// Base of the portal's own blob store
pub const BLOB_BASE_URL: &str = "https://dcnpruvgeemnaxr5.public.blob.vercel-storage.com";

/// Filename used when nothing usable survives sanitization
const FALLBACK_FILENAME: &str = "arquivo";

/// Build a blob URL from a relative `<folder>/<file>` path.
///
/// The path is percent-decoded first; anything that could climb or reset
/// the path is rejected. The result still has to pass the proxy policy.
pub fn blob_url(raw_path: &str) -> Result<Url, ProxyError> {
    let decoded = urlencoding::decode(raw_path)
        .map_err(|e| ProxyError::InvalidPath(format!("not UTF-8 after decoding: {e}")))?;

    if decoded.contains("..")
        || decoded.contains("//")
        || decoded.starts_with('/')
        || decoded.contains('\\')
    {
        return Err(ProxyError::InvalidPath(format!("{decoded:?}")));
    }

    let mut url = Url::parse(BLOB_BASE_URL).map_err(|e| ProxyError::MalformedUrl(e.to_string()))?;
    url.set_path(&decoded);
    Ok(url)
}

/// Object path named by a `filePath` parameter.
///
/// Accepts a raw storage path, or a storage download URL of the form
/// `…/o/<percent-encoded path>?alt=media`, which is reduced to its path.
pub fn storage_object_path(file_path: &str) -> Result<String, StoreError> {
    if !file_path.starts_with("http") {
        return Ok(file_path.to_string());
    }

    let url = Url::parse(file_path).map_err(|e| StoreError::InvalidPath(e.to_string()))?;
    let encoded = url
        .path()
        .split("/o/")
        .nth(1)
        .filter(|encoded| !encoded.is_empty())
        .ok_or_else(|| StoreError::InvalidPath("download URL has no object path".to_string()))?;

    let decoded = urlencoding::decode(encoded)
        .map_err(|e| StoreError::InvalidPath(format!("not UTF-8 after decoding: {e}")))?;
    Ok(decoded.into_owned())
}

/// Final path segment of `name`, safe to place inside a quoted header value
pub fn attachment_filename(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// `Content-Disposition` value forcing a download.
///
/// Carries an ASCII `filename` and, when the name is not plain ASCII, an
/// RFC 5987 `filename*` with the original spelling.
pub fn attachment_disposition(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or_default();
    let ascii = attachment_filename(base);

    if base.is_ascii() || base.chars().any(char::is_control) {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(base)
        )
    }
}

/// Decoded final segment of a URL path, for naming proxied downloads
pub fn url_filename(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    urlencoding::decode(last)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| last.to_string())
}
