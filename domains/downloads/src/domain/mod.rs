//! Pure download rules: the proxy allowlist and path handling

pub mod path;
pub mod policy;

pub use path::{
    attachment_disposition, attachment_filename, blob_url, storage_object_path, url_filename,
    BLOB_BASE_URL,
};
pub use policy::{ResourceProxyPolicy, ALLOWED_FOLDERS, ALLOWED_HOST_SUFFIXES};
