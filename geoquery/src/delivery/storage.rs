//! Object storage client for result packages.
//!
//! The pipeline only needs one operation from storage: put a local file at
//! a destination key and report where it ended up. [`ObjectStorage`] keeps
//! that boundary narrow so tests can record uploads without a network, and
//! [`S3Storage`] implements it against any S3-compatible service.

use crate::settings::StorageSettings;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::future::Future;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors from uploading a result package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The local file could not be read.
    #[error("cannot read '{path}': {message}")]
    Read { path: String, message: String },

    /// The storage service rejected or failed the upload.
    #[error("upload to '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

/// Trait for object storage clients.
///
/// Implementations upload a local file to a remote key and return the
/// resulting object location (a URL suitable for the completion
/// notification).
pub trait ObjectStorage: Send + Sync {
    /// Uploads `local` to `key`.
    ///
    /// # Returns
    ///
    /// The destination location of the stored object.
    fn put_file(
        &self,
        local: &Path,
        key: &str,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;
}

/// Object storage client backed by an S3-compatible service.
///
/// Configured entirely from [`StorageSettings`]: static credentials, bucket,
/// endpoint, and region. Path-style addressing is used so that non-AWS
/// endpoints (MinIO and friends) resolve without virtual-host DNS.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    settings: StorageSettings,
}

impl S3Storage {
    /// Creates a client from storage settings.
    pub fn new(settings: StorageSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "geoquery",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint.clone())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self {
            client: Client::from_conf(config),
            settings,
        }
    }
}

impl ObjectStorage for S3Storage {
    async fn put_file(&self, local: &Path, key: &str) -> Result<String, StorageError> {
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| StorageError::Read {
                path: local.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(key, bucket = %self.settings.bucket, "uploading result package");
        self.client
            .put_object()
            .bucket(&self.settings.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(self.settings.object_location(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Upload {
            key: "geoquery/req-1_output.zip".to_string(),
            message: "access denied".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "upload to 'geoquery/req-1_output.zip' failed: access denied"
        );
    }
}
