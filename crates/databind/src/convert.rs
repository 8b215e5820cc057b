//! Scalar conversions from tree values to target field types, used by assign
//! closures and [`Args`](crate::Args) getters.

use databind_core::{BindError, Value};

pub fn string(value: &Value, field: &str) -> Result<String, BindError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| BindError::IncompatibleValue(field.to_string()))
}

pub fn int(value: &Value, field: &str) -> Result<i64, BindError> {
    value
        .as_i64()
        .ok_or_else(|| BindError::IncompatibleValue(field.to_string()))
}

pub fn uint(value: &Value, field: &str) -> Result<u64, BindError> {
    value
        .as_u64()
        .ok_or_else(|| BindError::IncompatibleValue(field.to_string()))
}

pub fn float(value: &Value, field: &str) -> Result<f64, BindError> {
    value
        .as_f64()
        .ok_or_else(|| BindError::IncompatibleValue(field.to_string()))
}

pub fn boolean(value: &Value, field: &str) -> Result<bool, BindError> {
    value
        .as_bool()
        .ok_or_else(|| BindError::IncompatibleValue(field.to_string()))
}
