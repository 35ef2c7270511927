//! Reconstruction of numeric columns from digit-only text.
//!
//! A text column such as `["1", "a2", "3"]` is classified element by
//! element: values made only of ASCII digits become numbers, everything else
//! becomes missing. No partial extraction is attempted, so `"a2"` is missing
//! rather than `2`.

use tablekit_model::Value;

use crate::function::{FunctionResult, Transformation};

/// Returns true if `value` is one or more ASCII digits and nothing else.
pub fn is_digit_string(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a single value.
///
/// - Digit-only text parses to a number, unless it overflows `f64`.
/// - Any other text becomes missing.
/// - Numbers and missing markers pass through unchanged.
pub fn classify_value(value: &Value) -> Value {
    match value {
        Value::Text(text) if is_digit_string(text) => {
            // Past f64::MAX the parse overflows to infinity, which is not a number here.
            text.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or(Value::Missing, Value::Number)
        }
        Value::Text(_) | Value::Missing => Value::Missing,
        Value::Number(n) => Value::Number(*n),
    }
}

/// Classify every value of a column into a freshly built buffer.
pub fn classify_numeric(values: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        out.push(classify_value(value));
    }
    out
}

/// [`classify_numeric`] as a [`Transformation`]. The auxiliary column is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyNumeric;

impl Transformation for ClassifyNumeric {
    fn apply(&self, values: &[Value], _auxiliary: Option<&[Value]>) -> FunctionResult {
        Ok(classify_numeric(values))
    }
}
