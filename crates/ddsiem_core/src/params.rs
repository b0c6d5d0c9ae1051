use serde_json::{Map, Value};
use std::fmt;

use crate::constants::{map_severity, map_sort};
use crate::error::AppError;

/// Keys whose values are lower-cased (scalar or list of strings).
const LOWERCASE_KEYS: [&str; 3] = ["state", "detection_method", "include"];

/// Cleaned parameter map consumed by every operation.
///
/// Values are kept as loose JSON; the typed accessors below decide what a key means at the
/// point of use. A `null` value (an unmapped severity) reads as absent everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

/// Whole float inside the i64 range. `i64::MAX as f64` rounds up to 2^63, hence the open end.
fn is_whole_i64(f: f64) -> bool {
    f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f)
}

/// `false` and zero are meaningful; other empty values are not.
fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn lowercase(key: &str, value: Value) -> Result<Value, AppError> {
    match value {
        Value::String(s) => Ok(Value::String(s.to_lowercase())),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(Value::String(s.to_lowercase())),
                other => Err(AppError::invalid_param(
                    key,
                    format!("expected a list of strings; got item={other}"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(AppError::invalid_param(
            key,
            format!("expected a string or list of strings; got {other}"),
        )),
    }
}

fn translate_severity(value: Value) -> Value {
    let mapped = value.as_str().and_then(map_severity);
    match mapped {
        Some(severity) => Value::String(severity.to_string()),
        None => {
            tracing::warn!(severity = %value, "unmapped severity dropped from parameters");
            Value::Null
        }
    }
}

fn translate_sort(value: Value) -> Value {
    match value.as_str().and_then(map_sort) {
        Some(sort) => Value::String(sort.to_string()),
        None => value,
    }
}

/// Normalize a host parameter mapping.
///
/// A `null` input is an empty mapping; any other non-object is rejected.
pub fn build_params(raw: &Value) -> Result<Params, AppError> {
    let input = match raw {
        Value::Null => return Ok(Params::default()),
        Value::Object(map) => map,
        other => {
            return Err(AppError::new(
                "PARAM_INVALID",
                "Operation parameters must be a mapping",
            )
            .with_details(format!("got={other}")))
        }
    };

    let mut out = Map::new();
    for (key, value) in input {
        if !is_meaningful(value) {
            continue;
        }
        let value = value.clone();
        let value = if LOWERCASE_KEYS.contains(&key.as_str()) {
            lowercase(key, value)?
        } else if key == "severity" {
            translate_severity(value)
        } else if key == "sort" {
            translate_sort(value)
        } else {
            value
        };
        out.insert(key.clone(), value);
    }

    let params = Params(out);
    tracing::info!(params = %params, "updated params");
    Ok(params)
}

impl Params {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Raw stored value, including a `null` left by an unmapped severity.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scalar text. Numbers are rendered; booleans and containers are rejected.
    pub fn string(&self, key: &str) -> Result<Option<String>, AppError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(AppError::invalid_param(
                key,
                format!("expected text; got {other}"),
            )),
        }
    }

    /// A single string or a list of strings.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, AppError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        AppError::invalid_param(key, format!("expected strings; got item={item}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(AppError::invalid_param(
                key,
                format!("expected a string or list of strings; got {other}"),
            )),
        }
    }

    /// Integer from a JSON number or numeric text.
    pub fn i64(&self, key: &str) -> Result<Option<i64>, AppError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| is_whole_i64(*f)).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| AppError::invalid_param(key, format!("expected an integer; got {value}")))
    }

    /// Only real booleans count; `"true"` as text is not a boolean.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Identifier path parameter. Integers are rendered as text.
    pub fn require_id(&self, key: &str) -> Result<String, AppError> {
        match self.get(key) {
            None => Err(AppError::missing_param(key)),
            Some(Value::String(s)) if s.trim().is_empty() => Err(AppError::missing_param(key)),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(AppError::invalid_param(
                key,
                format!("expected an identifier; got {other}"),
            )),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde_json::Map has no Display of its own.
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accessor_accepts_text_and_rejects_garbage() {
        let p = build_params(&json!({"limit": "25", "offset": 10, "count": "many"})).expect("params");
        assert_eq!(p.i64("limit").expect("limit"), Some(25));
        assert_eq!(p.i64("offset").expect("offset"), Some(10));
        assert_eq!(p.i64("count").expect_err("count").code, "PARAM_INVALID");
        assert_eq!(p.i64("absent").expect("absent"), None);
    }

    #[test]
    fn numeric_accessor_rejects_out_of_range_floats() {
        let p = build_params(&json!({"page_size": 1e30, "count": -1e30, "start": 20.0}))
            .expect("params");
        assert_eq!(p.i64("page_size").expect_err("too large").code, "PARAM_INVALID");
        assert_eq!(p.i64("count").expect_err("too small").code, "PARAM_INVALID");
        assert_eq!(p.i64("start").expect("whole float"), Some(20));
    }

    #[test]
    fn bool_accessor_ignores_text() {
        let p = build_params(&json!({"a": true, "b": "true"})).expect("params");
        assert_eq!(p.bool("a"), Some(true));
        assert_eq!(p.bool("b"), None);
    }

    #[test]
    fn require_id_renders_numbers() {
        let p = build_params(&json!({"incident_id": 42})).expect("params");
        assert_eq!(p.require_id("incident_id").expect("id"), "42");
        assert_eq!(
            p.require_id("event_id").expect_err("missing").code,
            "PARAM_MISSING"
        );

        let blank = Params::from_map(
            json!({"event_id": "  "}).as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(
            blank.require_id("event_id").expect_err("blank").code,
            "PARAM_MISSING"
        );
    }

    #[test]
    fn non_object_input_is_rejected() {
        assert!(build_params(&Value::Null).expect("null").is_empty());
        assert_eq!(
            build_params(&json!([1, 2])).expect_err("array").code,
            "PARAM_INVALID"
        );
    }
}
