//! Coercion of raw keyword arguments into native-typed values.
//!
//! The job framework delivers keyword arguments as JSON, which means numeric
//! inputs usually arrive as strings. Coercion converts them to the native
//! representation the computation function expects, using the declared
//! parameter types. It runs after validation has already accepted the
//! request, so a conversion failure here is fatal for the invocation rather
//! than a user-facing rejection.

use super::types::{DType, Parameter};
use super::Kwargs;
use serde_json::{Number, Value};
use std::str::FromStr;
use thiserror::Error;

/// Fatal conversion failures.
///
/// These indicate a value that slipped past validation (or a pipeline that
/// skipped it); they propagate to the job framework's failure handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Declared integer parameter holds a value with no integer form.
    #[error("cannot coerce '{name}'={value} to an integer")]
    NotAnInteger { name: String, value: String },

    /// Declared float parameter holds a value with no finite float form.
    #[error("cannot coerce '{name}'={value} to a float")]
    NotAFloat { name: String, value: String },
}

/// Converts raw keyword arguments to native types per the parameter list.
///
/// For each key: a matching `Int` parameter yields a JSON integer, a
/// matching `Float`/`Lat`/`Lon` parameter yields a JSON float, and every
/// other declared type passes through unchanged. Keys with no matching
/// parameter also pass through unchanged; coercion never drops a key.
/// Values already in native form are returned as-is, so coercion is
/// idempotent.
pub fn coerce_kwargs(parameters: &[Parameter], raw: &Kwargs) -> Result<Kwargs, CoerceError> {
    let mut native = Kwargs::new();
    for (name, value) in raw {
        let coerced = match parameters.iter().find(|p| p.name == *name) {
            Some(p) => coerce_value(p, value)?,
            None => value.clone(),
        };
        native.insert(name.clone(), coerced);
    }
    Ok(native)
}

fn coerce_value(param: &Parameter, value: &Value) -> Result<Value, CoerceError> {
    match param.d_type {
        DType::Int => to_integer(param, value),
        DType::Float | DType::Lat | DType::Lon => to_float(param, value),
        DType::String | DType::Date | DType::Time | DType::Wkt => Ok(value.clone()),
    }
}

fn to_integer(param: &Parameter, value: &Value) -> Result<Value, CoerceError> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::String(s) => i64::from_str(s)
            .map(Value::from)
            .map_err(|_| CoerceError::NotAnInteger {
                name: param.name.clone(),
                value: s.clone(),
            }),
        other => Err(CoerceError::NotAnInteger {
            name: param.name.clone(),
            value: other.to_string(),
        }),
    }
}

fn to_float(param: &Parameter, value: &Value) -> Result<Value, CoerceError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => f64::from_str(s).ok(),
        _ => None,
    };
    // JSON numbers cannot carry NaN or infinity, so a non-finite parse is
    // as fatal as a failed one.
    parsed
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| CoerceError::NotAFloat {
            name: param.name.clone(),
            value: value.to_string(),
        })
}
