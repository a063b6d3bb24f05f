//! Task contract between analysis code and the job framework.
//!
//! A task is a named, parameterized unit of computation. Implementing
//! [`CubeTask`] declares the task's parameter list, the bounds the job
//! framework uses for duplicate-request collapsing and result caching, and
//! the computation entry point itself. [`TaskRegistration`] derives the
//! immutable declaration handed to the framework at registration time.
//!
//! # Example
//!
//! ```ignore
//! use geoquery::param::{DType, Kwargs, Parameter};
//! use geoquery::task::{ComputeError, CubeTask};
//! use std::path::{Path, PathBuf};
//!
//! struct WaterExtent {
//!     parameters: Vec<Parameter>,
//! }
//!
//! impl CubeTask<Datacube> for WaterExtent {
//!     fn name(&self) -> &str {
//!         "water-extent"
//!     }
//!
//!     fn parameters(&self) -> &[Parameter] {
//!         &self.parameters
//!     }
//!
//!     fn compute(
//!         &self,
//!         cube: &Datacube,
//!         workdir: &Path,
//!         kwargs: &Kwargs,
//!     ) -> Result<Vec<PathBuf>, ComputeError> {
//!         // Query the cube, write GeoTIFFs into workdir...
//!     }
//! }
//! ```

mod registration;

pub use registration::{FingerprintKind, RegistrationError, TaskRegistration};

use crate::param::{Kwargs, Parameter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on how long a duplicate request waits for an in-flight
/// identical computation before re-executing.
pub const DEFAULT_HERD_AVOIDANCE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default duration for which a finished result may be reused for an
/// identical request. One day.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(60 * 60 * 24);

/// Errors raised by a task's computation function.
///
/// Computation code is supplied per task and may fail in arbitrary ways;
/// failures propagate uncaught through the pipeline to the job framework.
pub type ComputeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named, parameterized unit of geospatial computation.
///
/// `H` is the data-access handle type produced by the deployment's
/// [`CubeSource`](crate::cube::CubeSource). Tasks are defined once and
/// shared read-only across invocations; all per-invocation state lives in
/// the pipeline, never on the task.
pub trait CubeTask<H>: Send + Sync {
    /// Unique task name, used as the job-framework identity and the
    /// data-access session name.
    fn name(&self) -> &str;

    /// Human-readable name for request forms and listings.
    fn display_name(&self) -> &str {
        self.name()
    }

    /// Free-text description of what the task produces.
    fn description(&self) -> &str {
        ""
    }

    /// Ordered parameter list declaring the task's inputs.
    fn parameters(&self) -> &[Parameter];

    /// Bound on how long a duplicate request waits for an identical
    /// in-flight computation.
    fn herd_avoidance_timeout(&self) -> Duration {
        DEFAULT_HERD_AVOIDANCE_TIMEOUT
    }

    /// Duration for which a finished result may be served to identical
    /// requests without re-executing.
    fn cache_duration(&self) -> Duration {
        DEFAULT_CACHE_DURATION
    }

    /// Runs the analysis.
    ///
    /// Called with coerced keyword arguments, a data-access handle, and a
    /// per-invocation working directory that already exists on disk.
    ///
    /// # Returns
    ///
    /// The ordered list of absolute paths of every output file produced
    /// inside (or copied into) the working directory.
    fn compute(
        &self,
        cube: &H,
        workdir: &Path,
        kwargs: &Kwargs,
    ) -> Result<Vec<PathBuf>, ComputeError>;
}
