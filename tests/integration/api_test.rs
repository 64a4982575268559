//! Router-level tests over the composed application
//!
//! Every external seam (identity provider, admin registry, upstream fetch,
//! file store) is a programmable mock, so these run without network access.

mod common;
mod downloads;
mod routing;
mod sessions;
