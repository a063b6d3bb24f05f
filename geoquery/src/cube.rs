//! Data-access boundary to the geospatial cube.
//!
//! The cube itself is an external collaborator; this core only needs a way
//! to obtain a handle scoped to the running task's identity and to hand that
//! handle to the computation function. The handle type is opaque here, which
//! keeps the pipeline independent of any particular data-access library and
//! lets tests substitute a stub source.

use thiserror::Error;

/// Failure to obtain a data-access handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cube connection failed: {message}")]
pub struct ConnectError {
    /// Human-readable failure description.
    pub message: String,
}

impl ConnectError {
    /// Creates a connection error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of data-access handles.
///
/// Implementations wrap a concrete geospatial data-access library. The
/// pipeline calls [`connect`](CubeSource::connect) once per invocation with
/// the task's name, so the library can attribute the session to the task.
pub trait CubeSource: Send + Sync {
    /// Opaque data-access handle passed to the computation function.
    type Handle;

    /// Opens a handle scoped to the named task.
    fn connect(&self, app_name: &str) -> Result<Self::Handle, ConnectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedSource;

    impl CubeSource for NamedSource {
        type Handle = String;

        fn connect(&self, app_name: &str) -> Result<String, ConnectError> {
            Ok(format!("session:{}", app_name))
        }
    }

    #[test]
    fn test_connect_scopes_handle_to_task_name() {
        let source = NamedSource;
        let handle = source.connect("ndvi-anomaly").unwrap();
        assert_eq!(handle, "session:ndvi-anomaly");
    }

    #[test]
    fn test_connect_error_display() {
        let err = ConnectError::new("index unreachable");
        assert_eq!(format!("{}", err), "cube connection failed: index unreachable");
    }
}
