//! Value rules: numeric bounds and allowed-value sets per column.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inference::classifier;

/// Constraints on the values of one column.
///
/// Each constraint that is present is evaluated independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRule {
    /// Values below this bound are violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Values above this bound are violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Values outside this set are violations. `null` admits missing cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
}

impl ValueRule {
    /// Create an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the allowed values.
    pub fn with_allowed<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the rule bounds values numerically.
    pub fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Check a cell against the allowed set. Without a set, everything is allowed.
    pub fn allows(&self, cell: Option<&str>) -> bool {
        let Some(allowed) = &self.allowed else {
            return true;
        };
        allowed.iter().any(|candidate| allowed_matches(candidate, cell))
    }
}

/// Compare one allowed value against a raw cell.
///
/// Strings compare literally, numbers numerically and booleans against
/// boolean literals. `null` matches only a missing cell.
fn allowed_matches(candidate: &Value, cell: Option<&str>) -> bool {
    match (candidate, cell) {
        (Value::Null, None) => true,
        (_, None) | (Value::Null, Some(_)) => false,
        (Value::String(s), Some(cell)) => s == cell,
        (Value::Number(n), Some(cell)) => match (n.as_f64(), classifier::try_parse_float(cell)) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        },
        (Value::Bool(b), Some(cell)) => match cell.trim().to_lowercase().as_str() {
            "true" => *b,
            "false" => !*b,
            _ => false,
        },
        (Value::Array(_) | Value::Object(_), Some(_)) => false,
    }
}

/// Render a bound the way a user wrote it: `0` rather than `0.0`.
pub(crate) fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}
