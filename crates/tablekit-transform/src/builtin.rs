//! Named transformations that can be referenced from configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tablekit_model::Value;

use crate::error::{Result, TransformError};
use crate::function::{FunctionError, FunctionResult, Transformation, elementwise_with};
use crate::numeric::classify_numeric;

/// Built-in transformations, addressable by snake_case name.
///
/// Binary arithmetic uses the auxiliary column as the right operand, or the
/// column itself when no auxiliary column is configured. A missing operand
/// yields missing, as does division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum BuiltinFunction {
    /// Copy values unchanged.
    Identity,
    /// Digit-only text to numbers, everything else missing.
    ClassifyNumeric,
    /// `value + auxiliary`
    Add,
    /// `value - auxiliary`
    Subtract,
    /// `value * auxiliary`
    Multiply,
    /// `value / auxiliary`
    Divide,
    /// `-value`
    Negate,
    /// Uppercase text.
    Uppercase,
    /// Lowercase text.
    Lowercase,
    /// Trim surrounding whitespace from text.
    Trim,
}

impl BuiltinFunction {
    /// Every built-in.
    pub const ALL: [BuiltinFunction; 10] = [
        BuiltinFunction::Identity,
        BuiltinFunction::ClassifyNumeric,
        BuiltinFunction::Add,
        BuiltinFunction::Subtract,
        BuiltinFunction::Multiply,
        BuiltinFunction::Divide,
        BuiltinFunction::Negate,
        BuiltinFunction::Uppercase,
        BuiltinFunction::Lowercase,
        BuiltinFunction::Trim,
    ];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinFunction::Identity => "identity",
            BuiltinFunction::ClassifyNumeric => "classify_numeric",
            BuiltinFunction::Add => "add",
            BuiltinFunction::Subtract => "subtract",
            BuiltinFunction::Multiply => "multiply",
            BuiltinFunction::Divide => "divide",
            BuiltinFunction::Negate => "negate",
            BuiltinFunction::Uppercase => "uppercase",
            BuiltinFunction::Lowercase => "lowercase",
            BuiltinFunction::Trim => "trim",
        }
    }

    /// Returns true if the function reads an auxiliary column when given one.
    pub fn uses_auxiliary(self) -> bool {
        matches!(
            self,
            BuiltinFunction::Add
                | BuiltinFunction::Subtract
                | BuiltinFunction::Multiply
                | BuiltinFunction::Divide
        )
    }
}

impl FromStr for BuiltinFunction {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        BuiltinFunction::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| TransformError::UnknownFunction(s.to_string()))
    }
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Transformation for BuiltinFunction {
    fn apply(&self, values: &[Value], auxiliary: Option<&[Value]>) -> FunctionResult {
        let op = *self;
        match op {
            BuiltinFunction::Identity => Ok(values.to_vec()),
            BuiltinFunction::ClassifyNumeric => Ok(classify_numeric(values)),
            BuiltinFunction::Add
            | BuiltinFunction::Subtract
            | BuiltinFunction::Multiply
            | BuiltinFunction::Divide => {
                elementwise_with(move |a, b| arithmetic(op, a, b)).apply(values, auxiliary)
            }
            BuiltinFunction::Negate => map_numbers(op, values, |n| -n),
            BuiltinFunction::Uppercase => map_text(op, values, str::to_uppercase),
            BuiltinFunction::Lowercase => map_text(op, values, str::to_lowercase),
            BuiltinFunction::Trim => map_text(op, values, |s| s.trim().to_string()),
        }
    }
}

fn arithmetic(op: BuiltinFunction, a: &Value, b: &Value) -> std::result::Result<Value, FunctionError> {
    match (a, b) {
        (Value::Missing, _) | (_, Value::Missing) => Ok(Value::Missing),
        (Value::Number(x), Value::Number(y)) => Ok(match op {
            BuiltinFunction::Add => Value::Number(x + y),
            BuiltinFunction::Subtract => Value::Number(x - y),
            BuiltinFunction::Multiply => Value::Number(x * y),
            BuiltinFunction::Divide if *y == 0.0 => Value::Missing,
            BuiltinFunction::Divide => Value::Number(x / y),
            _ => return Err(FunctionError::new(format!("{op} is not arithmetic"))),
        }),
        _ => Err(FunctionError::new(format!("{op} expects numeric operands"))),
    }
}

fn map_numbers(op: BuiltinFunction, values: &[Value], f: impl Fn(f64) -> f64) -> FunctionResult {
    let mut out = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        out.push(match value {
            Value::Missing => Value::Missing,
            Value::Number(n) => Value::Number(f(*n)),
            Value::Text(_) => {
                return Err(FunctionError::new(format!(
                    "{op} expects numbers, found text at row {row}"
                )));
            }
        });
    }
    Ok(out)
}

fn map_text(op: BuiltinFunction, values: &[Value], f: impl Fn(&str) -> String) -> FunctionResult {
    let mut out = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        out.push(match value {
            Value::Missing => Value::Missing,
            Value::Text(s) => Value::Text(f(s)),
            Value::Number(_) => {
                return Err(FunctionError::new(format!(
                    "{op} expects text, found a number at row {row}"
                )));
            }
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[Option<f64>]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    #[test]
    fn test_names_round_trip() {
        for f in BuiltinFunction::ALL {
            assert_eq!(f.name().parse::<BuiltinFunction>().unwrap(), f);
            let json = serde_json::to_string(&f).unwrap();
            assert_eq!(json, format!("\"{}\"", f.name()));
        }
        assert!("sqrt".parse::<BuiltinFunction>().is_err());
    }

    #[test]
    fn test_add_without_auxiliary_doubles() {
        let out = BuiltinFunction::Add
            .apply(&nums(&[Some(3.0), None, Some(5.0)]), None)
            .unwrap();
        assert_eq!(out, nums(&[Some(6.0), None, Some(10.0)]));
    }

    #[test]
    fn test_arithmetic_with_auxiliary() {
        let values = nums(&[Some(3.0), Some(4.0), Some(5.0)]);
        let aux = nums(&[Some(2.0), Some(0.0), None]);
        assert_eq!(
            BuiltinFunction::Subtract.apply(&values, Some(&aux)).unwrap(),
            nums(&[Some(1.0), Some(4.0), None])
        );
        assert_eq!(
            BuiltinFunction::Multiply.apply(&values, Some(&aux)).unwrap(),
            nums(&[Some(6.0), Some(0.0), None])
        );
        assert_eq!(
            BuiltinFunction::Divide.apply(&values, Some(&aux)).unwrap(),
            nums(&[Some(1.5), None, None])
        );
    }

    #[test]
    fn test_arithmetic_rejects_text() {
        let err = BuiltinFunction::Add
            .apply(&[Value::from("a")], None)
            .unwrap_err();
        assert_eq!(err.message(), "row 0: add expects numeric operands");
    }

    #[test]
    fn test_text_functions() {
        let values = vec![Value::from(" Ab "), Value::Missing];
        assert_eq!(
            BuiltinFunction::Trim.apply(&values, None).unwrap(),
            vec![Value::from("Ab"), Value::Missing]
        );
        assert_eq!(
            BuiltinFunction::Uppercase.apply(&values, None).unwrap(),
            vec![Value::from(" AB "), Value::Missing]
        );
        assert!(BuiltinFunction::Lowercase.apply(&[Value::from(1)], None).is_err());
    }

    #[test]
    fn test_negate() {
        assert_eq!(
            BuiltinFunction::Negate.apply(&nums(&[Some(2.0), None]), None).unwrap(),
            nums(&[Some(-2.0), None])
        );
        assert!(BuiltinFunction::Negate.apply(&[Value::from("x")], None).is_err());
    }
}
