//! Ordered, serde-configured chains of table operations.
//!
//! A pipeline is plain data. It can be written by hand or stored as JSON:
//!
//! ```json
//! {
//!   "steps": [
//!     {"mutate": {
//!       "columns": {"ends_with": "_raw"},
//!       "function": "classify_numeric",
//!       "naming": {"policy": "derived", "template": "{name}_num"}
//!     }},
//!     {"filter": {"predicates": [
//!       {"column": "x_raw_num", "operator": ">", "threshold": 1}
//!     ]}},
//!     {"select": {"columns": {"names": ["id", "x_raw_num"]}}}
//!   ]
//! }
//! ```
//!
//! Each step receives the table produced by the previous one. The first
//! failure stops execution and is reported with its step index.

use serde::{Deserialize, Serialize};
use tablekit_model::{NamingRule, Table};
use tracing::info;

use crate::builtin::BuiltinFunction;
use crate::error::{Result, TransformError};
use crate::filter::{Predicate, PredicateConfig, filter_all};
use crate::selector::{ColumnSelector, select};
use crate::transform::transform;

/// Apply a built-in transformation to selected columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutateStep {
    /// Target columns.
    pub columns: ColumnSelector,
    /// Transformation to apply.
    pub function: BuiltinFunction,
    /// Output naming; in place when omitted.
    #[serde(default)]
    pub naming: NamingRule,
    /// Second operand for binary functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<String>,
}

impl MutateStep {
    /// Reject an auxiliary column the function would silently ignore.
    fn check_auxiliary(&self) -> Result<()> {
        if self.auxiliary.is_some() && !self.function.uses_auxiliary() {
            return Err(TransformError::UnusedAuxiliary {
                function: self.function.name().to_string(),
            });
        }
        Ok(())
    }
}

/// Keep rows satisfying every predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStep {
    /// Conjunction of predicates, operators unchecked until use.
    pub predicates: Vec<PredicateConfig>,
}

impl FilterStep {
    /// Check every operator symbol.
    pub fn predicates(&self) -> Result<Vec<Predicate>> {
        self.predicates
            .iter()
            .map(PredicateConfig::to_predicate)
            .collect()
    }
}

/// Keep only the selected columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStep {
    /// Columns to keep.
    pub columns: ColumnSelector,
}

/// A single pipeline operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Column transformation.
    Mutate(MutateStep),
    /// Row filter.
    Filter(FilterStep),
    /// Column projection.
    Select(SelectStep),
}

impl Step {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Mutate(_) => "mutate",
            Step::Filter(_) => "filter",
            Step::Select(_) => "select",
        }
    }

    /// Run this step against a table.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        match self {
            Step::Mutate(step) => {
                step.check_auxiliary()?;
                let columns = step.columns.resolve(table)?;
                transform(
                    table,
                    &columns,
                    &step.function,
                    &step.naming,
                    step.auxiliary.as_deref(),
                )
            }
            Step::Filter(step) => filter_all(table, &step.predicates()?),
            Step::Select(step) => {
                let columns = step.columns.resolve(table)?;
                select(table, &columns)
            }
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Parse a pipeline from JSON.
    ///
    /// Operator symbols and auxiliary columns are checked here as well, so a
    /// bad configuration fails on load instead of partway through a run.
    pub fn from_json(json: &str) -> Result<Self> {
        let pipeline: Self = serde_json::from_str(json)?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Check the parts of each step that do not depend on the input table.
    pub fn validate(&self) -> Result<()> {
        for step in &self.steps {
            match step {
                Step::Mutate(step) => step.check_auxiliary()?,
                Step::Filter(step) => {
                    step.predicates()?;
                }
                Step::Select(_) => {}
            }
        }
        Ok(())
    }

    /// Serialize the pipeline as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run every step in order, returning the final table.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        let mut current = table.clone();
        for (index, step) in self.steps.iter().enumerate() {
            info!(
                step = index,
                kind = step.label(),
                rows = current.height(),
                columns = current.width(),
                "Running pipeline step"
            );
            current = step.apply(&current).map_err(|source| TransformError::Step {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(current)
    }
}
