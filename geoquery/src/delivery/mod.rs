//! Delivery of packaged results.
//!
//! Two collaborators live behind traits here: the object storage service
//! that receives the result package ([`ObjectStorage`]) and the endpoint
//! that gets told about it ([`Notifier`]). Both are injected into the
//! pipeline at construction, so tests run against fakes and deployments
//! choose their transports.

mod notify;
mod storage;

pub use notify::{CompletionNotice, Notifier, NotifyError, WebhookNotifier};
pub use storage::{ObjectStorage, S3Storage, StorageError};
