//! Typed parameter lookup on a `serde_json::Value` object.
//!
//! Missing keys fall back to the caller's default. A key that is present with
//! the wrong JSON type is a configuration mistake and is reported as
//! [`EngineError::ParamTypeMismatch`] rather than silently ignored.

use crate::error::EngineError;
use serde_json::Value;

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> EngineError {
    EngineError::ParamTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: json_type_name(got).to_string(),
    }
}

/// Reads `params[name]` as `f64`. Integers are widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> Result<f64, EngineError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Reads `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> Result<usize, EngineError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Checks that `value` is finite and lies in `(min, max]`.
pub fn require_in_half_open(name: &str, value: f64, min: f64, max: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > min && value <= max {
        Ok(value)
    } else {
        Err(EngineError::invalid_param(
            name,
            format!("{value} is outside ({min}, {max}]"),
        ))
    }
}

/// Checks that `value` is finite and `>= 0`.
pub fn require_non_negative(name: &str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::invalid_param(
            name,
            format!("{value} must be finite and non-negative"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_yields_default() {
        let p = json!({});
        assert_eq!(param_f64(&p, "damping", 0.97).unwrap(), 0.97);
        assert_eq!(param_usize(&p, "well_count", 6).unwrap(), 6);
    }

    #[test]
    fn null_is_treated_as_missing() {
        let p = json!({"damping": null});
        assert_eq!(param_f64(&p, "damping", 0.5).unwrap(), 0.5);
    }

    #[test]
    fn integer_widens_to_f64() {
        let p = json!({"max_speed": 8});
        assert_eq!(param_f64(&p, "max_speed", 1.0).unwrap(), 8.0);
    }

    #[test]
    fn non_object_params_fall_back_to_defaults() {
        let p = json!("not an object");
        assert_eq!(param_f64(&p, "damping", 0.97).unwrap(), 0.97);
    }

    #[test]
    fn string_for_number_is_a_type_mismatch() {
        let p = json!({"max_speed": "fast"});
        match param_f64(&p, "max_speed", 1.0) {
            Err(EngineError::ParamTypeMismatch { name, got, .. }) => {
                assert_eq!(name, "max_speed");
                assert_eq!(got, "string");
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn negative_or_fractional_count_is_rejected() {
        assert!(param_usize(&json!({"n": -1}), "n", 0).is_err());
        assert!(param_usize(&json!({"n": 2.5}), "n", 0).is_err());
        assert_eq!(param_usize(&json!({"n": 12}), "n", 0).unwrap(), 12);
    }

    #[test]
    fn half_open_range_excludes_lower_bound_only() {
        assert!(require_in_half_open("turn_rate", 0.0, 0.0, 1.0).is_err());
        assert!(require_in_half_open("turn_rate", 1.0, 0.0, 1.0).is_ok());
        assert!(require_in_half_open("turn_rate", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn non_negative_accepts_zero_rejects_infinity() {
        assert!(require_non_negative("margin", 0.0).is_ok());
        assert!(require_non_negative("margin", -0.1).is_err());
        assert!(require_non_negative("margin", f64::INFINITY).is_err());
    }
}
