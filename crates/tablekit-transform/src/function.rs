//! The transformation contract and element-wise adapters.
//!
//! A [`Transformation`] receives a whole column (and optionally an auxiliary
//! column) and returns a new column of the same length. The adapters in this
//! module never evaluate a vectorized conditional over the column: each
//! output element is computed and pushed into a freshly allocated buffer, so
//! the output kind is decided per element and then validated as a whole.

use std::fmt;

use tablekit_model::Value;
use thiserror::Error;

/// Failure raised by a transformation function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FunctionError {
    message: String,
}

impl FunctionError {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Output of a transformation.
pub type FunctionResult = std::result::Result<Vec<Value>, FunctionError>;

/// A pure function from column values to new column values.
///
/// Implementations must return exactly one value per input row, must not
/// fail on missing markers, and must produce a single kind of non-missing
/// value.
pub trait Transformation: Send + Sync {
    /// Apply to a column, with the auxiliary column's values when one is set.
    fn apply(&self, values: &[Value], auxiliary: Option<&[Value]>) -> FunctionResult;
}

impl<F> Transformation for F
where
    F: Fn(&[Value], Option<&[Value]>) -> FunctionResult + Send + Sync,
{
    fn apply(&self, values: &[Value], auxiliary: Option<&[Value]>) -> FunctionResult {
        self(values, auxiliary)
    }
}

/// Adapter mapping each value independently. The auxiliary column is ignored.
#[derive(Clone)]
pub struct Elementwise<F>(F);

/// Wrap a per-value function as a [`Transformation`].
pub fn elementwise<F>(f: F) -> Elementwise<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    Elementwise(f)
}

impl<F> Transformation for Elementwise<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    fn apply(&self, values: &[Value], _auxiliary: Option<&[Value]>) -> FunctionResult {
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            out.push((self.0)(value));
        }
        Ok(out)
    }
}

impl<F> fmt::Debug for Elementwise<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Elementwise")
    }
}

/// Adapter mapping each `(value, auxiliary)` pair.
///
/// Without an auxiliary column the value is paired with itself, so
/// `a + aux` degrades to `a + a`.
#[derive(Clone)]
pub struct ElementwiseWith<F>(F);

/// Wrap a fallible per-pair function as a [`Transformation`].
pub fn elementwise_with<F>(f: F) -> ElementwiseWith<F>
where
    F: Fn(&Value, &Value) -> std::result::Result<Value, FunctionError> + Send + Sync,
{
    ElementwiseWith(f)
}

impl<F> Transformation for ElementwiseWith<F>
where
    F: Fn(&Value, &Value) -> std::result::Result<Value, FunctionError> + Send + Sync,
{
    fn apply(&self, values: &[Value], auxiliary: Option<&[Value]>) -> FunctionResult {
        let other = auxiliary.unwrap_or(values);
        if other.len() != values.len() {
            return Err(FunctionError::new(format!(
                "auxiliary column has {} rows, expected {}",
                other.len(),
                values.len()
            )));
        }
        let mut out = Vec::with_capacity(values.len());
        for (row, (value, aux)) in values.iter().zip(other).enumerate() {
            let result = (self.0)(value, aux)
                .map_err(|err| FunctionError::new(format!("row {row}: {}", err.message())))?;
            out.push(result);
        }
        Ok(out)
    }
}

impl<F> fmt::Debug for ElementwiseWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementwiseWith")
    }
}
