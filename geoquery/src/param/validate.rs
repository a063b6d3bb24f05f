//! Validation rules for raw request values.
//!
//! Validation runs at request intake, before a task is dispatched, so that
//! malformed requests are rejected early with a message the intake layer can
//! surface to the requester. Every function here is a pure function of the
//! parameter descriptor and the raw value.

use super::types::{DType, Parameter};
use super::Kwargs;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;
use wkt::Wkt;

/// Rejection reasons for a raw request value.
///
/// The two variants keep "no such parameter" distinguishable from "value
/// fails its type rule" so callers can render precise messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name does not appear in the task's declared parameter list.
    #[error("parameter '{name}' not found")]
    UnknownParameter { name: String },

    /// The value fails the parameter's type or range rule.
    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Validates one raw value against a parameter descriptor.
///
/// Applies the type rule for `param.d_type`, then membership in
/// `param.valid` when that list is non-empty. Literals in `valid` are
/// compared against the raw value as submitted, before any coercion.
pub fn validate_value(param: &Parameter, value: &Value) -> Result<(), ValidationError> {
    let reason = match param.d_type {
        DType::Int => check_int(value),
        DType::Float => check_float(value).err(),
        DType::Lat => check_range(value, -90.0, 90.0, "latitude"),
        DType::Lon => check_range(value, -180.0, 180.0, "longitude"),
        DType::Wkt => check_wkt(value),
        // Date and time formats have no dedicated rule yet; they are
        // accepted whenever the value is a string, like DType::String.
        DType::String | DType::Date | DType::Time => check_string(value),
    };
    if let Some(reason) = reason {
        return Err(ValidationError::InvalidValue {
            name: param.name.clone(),
            reason,
        });
    }

    if !param.valid.is_empty() && !param.valid.contains(value) {
        return Err(ValidationError::InvalidValue {
            name: param.name.clone(),
            reason: "value is not in the permitted list".to_string(),
        });
    }

    Ok(())
}

/// Validates a single keyword argument against a task's parameter list.
///
/// The lookup is checked first: an unknown name is always rejected with
/// [`ValidationError::UnknownParameter`], independent of the value.
pub fn validate_kwarg(
    parameters: &[Parameter],
    name: &str,
    value: &Value,
) -> Result<(), ValidationError> {
    let param = parameters
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| ValidationError::UnknownParameter {
            name: name.to_string(),
        })?;
    validate_value(param, value)
}

/// Validates every keyword argument of a request, first failure wins.
pub fn validate_kwargs(parameters: &[Parameter], kwargs: &Kwargs) -> Result<(), ValidationError> {
    for (name, value) in kwargs {
        validate_kwarg(parameters, name, value)?;
    }
    Ok(())
}

/// Integer rule: a JSON integer, or a string matching `[+-]?[0-9]+`.
fn check_int(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => None,
        Value::String(s) => {
            let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                Some(format!("'{}' is not an integer", s))
            }
        }
        other => Some(format!("{} is not an integer", other)),
    }
}

/// Float rule: a JSON number, or a string parsing as a float literal.
fn check_float(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("{} is not a float", n)),
        Value::String(s) => {
            f64::from_str(s).map_err(|_| format!("'{}' is not a float", s))
        }
        other => Err(format!("{} is not a float", other)),
    }
}

/// Range rule for coordinate types: the float rule plus bounds.
fn check_range(value: &Value, min: f64, max: f64, label: &str) -> Option<String> {
    match check_float(value) {
        Ok(v) if (min..=max).contains(&v) => None,
        Ok(v) => Some(format!("{} {} outside [{}, {}]", label, v, min, max)),
        Err(reason) => Some(reason),
    }
}

/// WKT rule: a string the well-known-text parser accepts.
///
/// Geometric validity (self-intersection and the like) is not checked,
/// only that the text parses.
fn check_wkt(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => match s.parse::<Wkt<f64>>() {
            Ok(_) => None,
            Err(_) => Some(format!("'{}' is not well-known text", s)),
        },
        other => Some(format!("{} is not well-known text", other)),
    }
}

/// String rule: the value must be a native string.
fn check_string(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => None,
        other => Some(format!("{} is not a string", other)),
    }
}
