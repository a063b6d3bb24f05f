//! Typed parameter contract for task inputs.
//!
//! A task describes each of its inputs with a [`Parameter`]: a name, a
//! human-readable label, a semantic type ([`DType`]), and an optional list
//! of permitted literals. Raw request values are checked against these
//! descriptors at intake ([`validate_kwargs`]) and converted to native
//! types just before computation ([`coerce_kwargs`]).
//!
//! # Example
//!
//! ```
//! use geoquery::param::{coerce_kwargs, validate_kwargs, DType, Kwargs, Parameter};
//! use serde_json::json;
//!
//! let parameters = vec![
//!     Parameter::new("lat", "Latitude", DType::Lat, "Point of interest"),
//!     Parameter::new("year", "Year", DType::Int, "Acquisition year"),
//! ];
//!
//! let mut kwargs = Kwargs::new();
//! kwargs.insert("lat".to_string(), json!("45.0"));
//! kwargs.insert("year".to_string(), json!("2020"));
//!
//! validate_kwargs(&parameters, &kwargs).expect("request accepted");
//! let native = coerce_kwargs(&parameters, &kwargs).expect("convertible");
//! assert_eq!(native["lat"], json!(45.0));
//! assert_eq!(native["year"], json!(2020));
//! ```

mod coerce;
mod types;
mod validate;

pub use coerce::{coerce_kwargs, CoerceError};
pub use types::{DType, Parameter};
pub use validate::{validate_kwarg, validate_kwargs, validate_value, ValidationError};

/// Keyword arguments of one task invocation, keyed by parameter name.
pub type Kwargs = serde_json::Map<String, serde_json::Value>;
