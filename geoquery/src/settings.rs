//! Settings structs for the execution pipeline.
//!
//! These are pure data types with no loading or parsing logic; the host
//! process resolves its configuration however it likes and injects one
//! [`Settings`] value when constructing the pipeline. Nothing in this crate
//! reads configuration ad hoc.

use std::path::PathBuf;

/// Complete pipeline configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory under which per-invocation working directories are
    /// created (`<result_root>/<request_id>`).
    pub result_root: PathBuf,
    /// Endpoint for completion notifications. `None` disables the
    /// notification step entirely.
    pub result_url: Option<String>,
    /// Object storage destination for result packages.
    pub storage: StorageSettings,
}

/// Object storage configuration.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Access key for the storage service.
    pub access_key: String,
    /// Secret key for the storage service.
    pub secret_key: String,
    /// Bucket receiving result packages.
    pub bucket: String,
    /// Service endpoint URL (S3-compatible).
    pub endpoint: String,
    /// Region name expected by the service.
    pub region: String,
    /// Key prefix under which packages are stored
    /// (`<path_prefix>/<request_id>_output.zip`).
    pub path_prefix: String,
}

impl StorageSettings {
    /// Builds the destination key for a request's result package.
    pub fn result_key(&self, request_id: &str) -> String {
        format!(
            "{}/{}_output.zip",
            self.path_prefix.trim_end_matches('/'),
            request_id
        )
    }

    /// Builds the public location of an uploaded object.
    pub fn object_location(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}
