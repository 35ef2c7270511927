//! Row filtering driven by predicates stored as data.
//!
//! A [`Predicate`] names its column, operator and threshold at runtime, so a
//! filter can be assembled from configuration. Evaluation is a plain match
//! over [`Operator`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tablekit_model::{Table, Value};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Comparison operator for a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

impl Operator {
    /// All supported operators.
    pub const ALL: [Operator; 6] = [
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::Eq,
        Operator::Ne,
    ];

    /// The operator's symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }

    /// Returns true if an ordering between a value and the threshold satisfies
    /// this operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
        }
    }
}

impl FromStr for Operator {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s.trim())
            .ok_or_else(|| TransformError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A comparison between a named column and a threshold.
///
/// Numbers compare numerically and text lexicographically. Missing cells,
/// a missing threshold, or a kind mismatch never satisfy the predicate,
/// whatever the operator.
///
/// Serialized through [`PredicateConfig`], so an unknown operator symbol is
/// rejected with the same message as [`Predicate::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PredicateConfig", into = "PredicateConfig")]
pub struct Predicate {
    /// Column to read.
    pub column: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Right-hand value.
    pub threshold: Value,
}

impl Predicate {
    /// Create a predicate.
    pub fn new(column: impl Into<String>, operator: Operator, threshold: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            threshold: threshold.into(),
        }
    }

    /// Create a predicate from an operator symbol chosen at runtime.
    ///
    /// Fails with [`TransformError::InvalidOperator`] for anything outside
    /// `>`, `>=`, `<`, `<=`, `==`, `!=`.
    pub fn parse(
        column: impl Into<String>,
        operator: &str,
        threshold: impl Into<Value>,
    ) -> Result<Self> {
        Ok(Self::new(column, operator.parse()?, threshold))
    }

    /// Evaluate against one cell.
    pub fn evaluate(&self, value: &Value) -> bool {
        value
            .compare(&self.threshold)
            .is_some_and(|ordering| self.operator.accepts(ordering))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.threshold)
    }
}

/// Unchecked predicate as written in configuration, operator still a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateConfig {
    /// Column to read.
    pub column: String,
    /// Operator symbol.
    pub operator: String,
    /// Right-hand value.
    pub threshold: Value,
}

impl PredicateConfig {
    /// Check the operator symbol and build the predicate.
    pub fn to_predicate(&self) -> Result<Predicate> {
        Predicate::parse(self.column.as_str(), &self.operator, self.threshold.clone())
    }
}

impl From<Predicate> for PredicateConfig {
    fn from(predicate: Predicate) -> Self {
        Self {
            column: predicate.column,
            operator: predicate.operator.symbol().to_string(),
            threshold: predicate.threshold,
        }
    }
}

impl TryFrom<PredicateConfig> for Predicate {
    type Error = TransformError;

    fn try_from(config: PredicateConfig) -> Result<Self> {
        let operator = config.operator.parse()?;
        Ok(Self {
            column: config.column,
            operator,
            threshold: config.threshold,
        })
    }
}

/// Keep the rows satisfying `predicate`, preserving order and all columns.
pub fn filter_rows(table: &Table, predicate: &Predicate) -> Result<Table> {
    filter_all(table, std::slice::from_ref(predicate))
}

/// Keep the rows satisfying every predicate.
///
/// An empty predicate list keeps every row. Unknown columns are all
/// reported together before any row is evaluated.
pub fn filter_all(table: &Table, predicates: &[Predicate]) -> Result<Table> {
    let mut unknown: Vec<String> = Vec::new();
    for predicate in predicates {
        if !table.contains(&predicate.column) && !unknown.contains(&predicate.column) {
            unknown.push(predicate.column.clone());
        }
    }
    if !unknown.is_empty() {
        return Err(TransformError::UnknownColumn { names: unknown });
    }

    let mut mask = vec![true; table.height()];
    for predicate in predicates {
        let Some(column) = table.column(&predicate.column) else {
            return Err(TransformError::unknown_column(predicate.column.as_str()));
        };
        for (keep, value) in mask.iter_mut().zip(column.values()) {
            *keep = *keep && predicate.evaluate(value);
        }
    }

    let kept = mask.iter().filter(|keep| **keep).count();
    debug!(
        predicates = predicates.len(),
        rows = table.height(),
        kept,
        "Filtered rows"
    );
    Ok(table.filter_mask(&mask)?)
}
