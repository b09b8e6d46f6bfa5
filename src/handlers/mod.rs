// handlers/mod.rs - Route handlers split by access tier
//
// Public (no identity) → Protected (verified bearer identity required).
// The tier a route lives in must match the RoutePolicy it is registered with.

pub mod protected;
pub mod public;

use serde_json::{json, Number, Value};

use crate::error::ApiError;

/// Body returned by every create/update endpoint on success
pub const SAVED: &str = "Data saved successfully";

pub fn saved() -> Value {
    json!({ "status": SAVED })
}

/// A required string field: present and not blank
pub fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}

/// A required value of any JSON type: present and not null
pub fn required_value<'a>(value: &'a Option<Value>, field: &str) -> Result<&'a Value, ApiError> {
    value
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::missing_field(field))
}

/// Numeric calories from a stored value; numeric strings count too
pub fn calorie_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole numbers go out as integers, everything else as floats
pub fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}
