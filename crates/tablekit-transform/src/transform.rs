//! Apply one transformation across a set of columns.
//!
//! [`transform`] is the functional entry point; [`ColumnTransformer`] is the
//! builder form used when the same configuration is applied to several
//! tables.
//!
//! # Semantics
//!
//! - Every targeted column and the auxiliary column must exist.
//! - Derived names must not collide with columns outside the column set.
//! - All outputs are computed against the input table before anything is
//!   committed, so a failure leaves no partial result.
//! - Original columns keep their order; new derived columns are appended in
//!   column set order.

use std::sync::Arc;

use tablekit_model::{Column, ColumnSet, NamingRule, Table};
use tracing::{debug, warn};

use crate::error::{Result, TransformError};
use crate::function::Transformation;

/// Apply `function` to every column in `columns`, writing results per `naming`.
///
/// When `auxiliary` names a column, its values are passed as the second
/// operand for every targeted column. The input table is never modified.
///
/// # Errors
///
/// - [`TransformError::EmptyTable`] if `table` has no columns.
/// - [`TransformError::UnknownColumn`] listing every absent name.
/// - [`TransformError::DuplicateColumn`] if a derived name collides with a
///   column outside `columns`.
/// - [`TransformError::Transformation`] if the function fails or returns a
///   wrong-length or mixed-kind result.
pub fn transform(
    table: &Table,
    columns: &ColumnSet,
    function: &dyn Transformation,
    naming: &NamingRule,
    auxiliary: Option<&str>,
) -> Result<Table> {
    if table.is_empty() {
        return Err(TransformError::EmptyTable);
    }
    naming.validate()?;

    let mut unknown: Vec<String> = columns
        .iter()
        .filter(|name| !table.contains(name))
        .map(str::to_string)
        .collect();
    if let Some(aux) = auxiliary
        && !table.contains(aux)
        && !unknown.iter().any(|n| n == aux)
    {
        unknown.push(aux.to_string());
    }
    if !unknown.is_empty() {
        return Err(TransformError::UnknownColumn { names: unknown });
    }

    // Resolve output names up front so collisions fail before any work.
    let targets: Vec<(&str, String)> = columns
        .iter()
        .map(|name| (name, naming.output_name(name)))
        .collect();
    for (_, output) in &targets {
        if table.contains(output) && !columns.contains(output) {
            return Err(TransformError::DuplicateColumn {
                name: output.clone(),
            });
        }
    }

    debug!(
        columns = columns.len(),
        rows = table.height(),
        in_place = naming.is_in_place(),
        auxiliary = auxiliary.unwrap_or(""),
        "Applying column transformation"
    );

    let aux_values = auxiliary
        .and_then(|name| table.column(name))
        .map(Column::values);

    let mut results: Vec<Column> = Vec::with_capacity(targets.len());
    for (source, output) in targets {
        let Some(column) = table.column(source) else {
            return Err(TransformError::unknown_column(source));
        };
        let values = function.apply(column.values(), aux_values).map_err(|err| {
            warn!(column = source, error = %err, "Transformation failed");
            TransformError::Transformation {
                column: source.to_string(),
                message: err.to_string(),
            }
        })?;
        if values.len() != column.len() {
            return Err(TransformError::Transformation {
                column: source.to_string(),
                message: format!(
                    "returned {} values for {} rows",
                    values.len(),
                    column.len()
                ),
            });
        }
        let derived = Column::new(output, values).map_err(|err| {
            TransformError::Transformation {
                column: source.to_string(),
                message: err.to_string(),
            }
        })?;
        results.push(derived);
    }

    // Commit: overwrite same-named columns in place, append the rest.
    let mut output = table.clone().into_columns();
    for column in results {
        match output.iter().position(|c| c.name() == column.name()) {
            Some(idx) => output[idx] = column,
            None => output.push(column),
        }
    }
    Ok(Table::new(output)?)
}

/// Reusable configuration for [`transform`].
///
/// ```
/// use tablekit_model::{ColumnSet, NamingRule, Value, table};
/// use tablekit_transform::{ColumnTransformer, ClassifyNumeric};
///
/// let raw = table! { "id" => [1, 2], "x" => ["1", "a2"] }.unwrap();
/// let parsed = ColumnTransformer::new(ColumnSet::single("x"), ClassifyNumeric)
///     .naming(NamingRule::prefixed("num_").unwrap())
///     .apply(&raw)
///     .unwrap();
///
/// assert_eq!(parsed.column_names(), vec!["id", "x", "num_x"]);
/// assert_eq!(parsed.column("num_x").unwrap().values()[1], Value::Missing);
/// ```
#[derive(Clone)]
pub struct ColumnTransformer {
    columns: ColumnSet,
    function: Arc<dyn Transformation>,
    naming: NamingRule,
    auxiliary: Option<String>,
}

impl ColumnTransformer {
    /// Create a transformer writing in place with no auxiliary column.
    pub fn new(columns: ColumnSet, function: impl Transformation + 'static) -> Self {
        Self {
            columns,
            function: Arc::new(function),
            naming: NamingRule::InPlace,
            auxiliary: None,
        }
    }

    /// Set the output naming rule.
    pub fn naming(mut self, naming: NamingRule) -> Self {
        self.naming = naming;
        self
    }

    /// Set the auxiliary column passed as the second operand.
    pub fn auxiliary(mut self, name: impl Into<String>) -> Self {
        self.auxiliary = Some(name.into());
        self
    }

    /// Targeted columns.
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Apply to a table, returning a new table.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        transform(
            table,
            &self.columns,
            self.function.as_ref(),
            &self.naming,
            self.auxiliary.as_deref(),
        )
    }
}

impl std::fmt::Debug for ColumnTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnTransformer")
            .field("columns", &self.columns)
            .field("naming", &self.naming)
            .field("auxiliary", &self.auxiliary)
            .finish_non_exhaustive()
    }
}
