//! GeoQuery - task contracts and result delivery for data cube analysis
//!
//! This library is the core of a geospatial analysis service: it describes
//! task inputs with a typed parameter contract, validates and coerces raw
//! request values, and drives accepted requests through the execution
//! pipeline that packages, uploads, and announces their results. Queuing,
//! worker dispatch, duplicate-request collapsing, and the geospatial
//! computations themselves live outside this crate, behind the interfaces
//! in [`task`], [`cube`], and [`delivery`].
//!
//! # High-Level Flow
//!
//! ```ignore
//! use geoquery::delivery::S3Storage;
//! use geoquery::pipeline::{RequestContext, TaskRunner};
//!
//! let runner = TaskRunner::new(settings, cube_source, S3Storage::new(storage_settings));
//!
//! let request = RequestContext::new("req-42", raw_kwargs);
//! let outcome = runner.run(&water_extent_task, request).await?;
//! println!("result at {}", outcome.location);
//! ```

pub mod cube;
pub mod delivery;
pub mod param;
pub mod pipeline;
pub mod settings;
pub mod task;

/// Version of the GeoQuery library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
