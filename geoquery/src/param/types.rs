//! Parameter descriptor types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Semantic data type of a task parameter.
///
/// The type tag governs both the validation rule applied to a raw value
/// and the coercion target handed to the computation function. `Lat` and
/// `Lon` share the `Float` parse rule but add range constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// Free-form string value
    String,
    /// Whole number (`[+-]?[0-9]+`)
    Int,
    /// Floating point number, no range constraint
    Float,
    /// Latitude in decimal degrees, must lie in [-90, 90]
    Lat,
    /// Longitude in decimal degrees, must lie in [-180, 180]
    Lon,
    /// Calendar date (currently validated as a string)
    Date,
    /// Time of day (currently validated as a string)
    Time,
    /// Well-known-text geometry
    Wkt,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::String => "str",
            DType::Int => "int",
            DType::Float => "float",
            DType::Lat => "lat",
            DType::Lon => "lon",
            DType::Date => "date",
            DType::Time => "time",
            DType::Wkt => "wkt",
        };
        write!(f, "{}", name)
    }
}

/// Descriptor for one named, typed task input.
///
/// A parameter is constructed once when the task is defined and shared
/// read-only across every invocation of that task. `name` is the keyword
/// argument key and must be unique within a task's parameter list;
/// duplicates are rejected when the task is registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Keyword argument key, unique within one task
    pub name: String,
    /// Human-readable label for request forms and messages
    pub display_name: String,
    /// Semantic type governing validation and coercion
    pub d_type: DType,
    /// Free-text description of what the parameter controls
    pub description: String,
    /// Permitted literal values; empty means unrestricted within type
    pub valid: Vec<Value>,
}

impl Parameter {
    /// Creates a parameter with no value restriction beyond its type.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        d_type: DType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            d_type,
            description: description.into(),
            valid: Vec::new(),
        }
    }

    /// Restricts the parameter to an ordered list of permitted literals.
    pub fn with_valid(mut self, valid: Vec<Value>) -> Self {
        self.valid = valid;
        self
    }
}
