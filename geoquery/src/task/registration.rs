//! Registration declaration handed to the job framework.
//!
//! The framework needs to know, per task, which keyword arguments make up
//! the fingerprint of a request (for duplicate collapsing and result
//! caching) and by what shape each should be treated when fingerprinting.
//! That declaration is computed here exactly once per task definition and
//! never mutated afterwards; the framework receives a value, not a handle
//! to shared task state.

use super::CubeTask;
use crate::param::DType;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Shape of one fingerprinted keyword argument.
///
/// The framework only distinguishes integer-shaped values from text-shaped
/// ones when normalizing a request into a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintKind {
    /// Normalize as an integer before fingerprinting.
    Integer,
    /// Normalize as text before fingerprinting.
    Text,
}

impl FingerprintKind {
    /// Maps a parameter's semantic type to its fingerprint shape.
    ///
    /// Only `Int` fingerprints as an integer; every other type, including
    /// the coordinate types, fingerprints as text.
    pub fn for_d_type(d_type: DType) -> Self {
        match d_type {
            DType::Int => FingerprintKind::Integer,
            DType::String
            | DType::Float
            | DType::Lat
            | DType::Lon
            | DType::Date
            | DType::Time
            | DType::Wkt => FingerprintKind::Text,
        }
    }
}

/// Errors detected while deriving a task's registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two parameters share a name; kwargs would be ambiguous.
    #[error("task '{task}' declares parameter '{name}' more than once")]
    DuplicateParameter { task: String, name: String },
}

/// Immutable registration record for one task definition.
///
/// Derived once via [`TaskRegistration::for_task`] and passed by value to
/// the job-framework registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistration {
    /// Task name registered with the framework.
    pub task_name: String,
    /// Parameter names that are significant for request fingerprinting,
    /// in declaration order, each with its fingerprint shape.
    pub significant_kwargs: Vec<(String, FingerprintKind)>,
    /// Bound on how long a duplicate request waits for an identical
    /// in-flight computation.
    pub herd_avoidance_timeout: Duration,
    /// Duration for which a finished result may be reused.
    pub cache_duration: Duration,
}

impl TaskRegistration {
    /// Derives the registration record for a task definition.
    ///
    /// Every declared parameter is significant. Duplicate parameter names
    /// are rejected here, before the task ever reaches the framework.
    pub fn for_task<H>(task: &impl CubeTask<H>) -> Result<Self, RegistrationError> {
        let mut seen = HashSet::new();
        let mut significant_kwargs = Vec::with_capacity(task.parameters().len());
        for param in task.parameters() {
            if !seen.insert(param.name.as_str()) {
                return Err(RegistrationError::DuplicateParameter {
                    task: task.name().to_string(),
                    name: param.name.clone(),
                });
            }
            significant_kwargs.push((param.name.clone(), FingerprintKind::for_d_type(param.d_type)));
        }
        Ok(Self {
            task_name: task.name().to_string(),
            significant_kwargs,
            herd_avoidance_timeout: task.herd_avoidance_timeout(),
            cache_duration: task.cache_duration(),
        })
    }
}
