//! Per-invocation request context and the persisted request record.

use crate::param::Kwargs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the serialized request record, both on disk in the working
/// directory and as the archive entry name.
pub const QUERY_RECORD_NAME: &str = "query.json";

/// Opaque identifier of one task invocation.
///
/// Assigned by the job framework when the request is accepted; this core
/// only threads it through to name the working directory, the result
/// package, and the destination key.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a request ID with the given string value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string value of this request ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One task invocation as submitted by the job framework.
///
/// Owned exclusively by the pipeline call handling the invocation and
/// dropped when it returns; only the working directory persists on disk.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Identifier assigned to this invocation.
    pub request_id: RequestId,
    /// Raw keyword arguments as submitted, before coercion.
    pub kwargs: Kwargs,
}

impl RequestContext {
    /// Creates the context for one invocation.
    pub fn new(request_id: impl Into<RequestId>, kwargs: Kwargs) -> Self {
        Self {
            request_id: request_id.into(),
            kwargs,
        }
    }
}

/// Serialized snapshot of a request, persisted as `query.json`.
///
/// Kwargs are stored in their raw submitted form so the record mirrors what
/// the requester actually sent. Every field is already JSON-native, so
/// nothing is lost when the record is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    /// Name of the task that ran.
    pub task: String,
    /// Identifier of the invocation.
    pub request_id: String,
    /// When the record was written.
    pub submitted_at: DateTime<Utc>,
    /// Raw keyword arguments of the request.
    pub kwargs: Kwargs,
}

impl QueryRecord {
    /// Creates a record for the given invocation.
    pub fn new(task: impl Into<String>, request_id: &RequestId, kwargs: Kwargs) -> Self {
        Self {
            task: task.into(),
            request_id: request_id.as_str().to_string(),
            submitted_at: Utc::now(),
            kwargs,
        }
    }

    /// Writes the record to `query.json` inside the working directory.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn write_to(&self, workdir: &Path) -> io::Result<PathBuf> {
        let path = workdir.join(QUERY_RECORD_NAME);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, self).map_err(io::Error::from)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_request_id_display_and_value() {
        let id = RequestId::new("req-123");
        assert_eq!(id.as_str(), "req-123");
        assert_eq!(format!("{}", id), "req-123");
        assert_eq!(format!("{:?}", id), "RequestId(req-123)");
    }

    #[test]
    fn test_request_id_from_str_and_string() {
        let a: RequestId = "req-1".into();
        let b: RequestId = String::from("req-1").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_record_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let mut kwargs = Kwargs::new();
        kwargs.insert("lat".to_string(), json!("45.0"));

        let record = QueryRecord::new("water-extent", &RequestId::new("req-7"), kwargs.clone());
        let path = record.write_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), QUERY_RECORD_NAME);

        let read: QueryRecord =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(read.task, "water-extent");
        assert_eq!(read.request_id, "req-7");
        assert_eq!(read.kwargs, kwargs);
    }
}
