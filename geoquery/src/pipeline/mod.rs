//! Execution pipeline for validated task requests.
//!
//! ```text
//! Request → Validate → Workdir → Connect → Compute → Record → Package → Upload → Notify
//! ```
//!
//! The pipeline is deliberately linear: each step either completes or the
//! whole invocation fails, and there is no partial-completion state to
//! resume from. Concurrency between invocations is the job framework's
//! business; within one invocation everything runs to completion in order.
//!
//! # Key Components
//!
//! - [`RequestContext`] / [`RequestId`] - One invocation as submitted
//! - [`TaskRunner`] - Drives the step sequence against injected collaborators
//! - [`package_outputs`] / [`CollisionPolicy`] - Result archive construction
//! - [`QueryRecord`] - The persisted `query.json` request snapshot

mod context;
mod package;
mod runner;

pub use context::{QueryRecord, RequestContext, RequestId, QUERY_RECORD_NAME};
pub use package::{package_outputs, CollisionPolicy, PackageError};
pub use runner::{RunError, RunOutcome, TaskRunner};
