//! Ordered collections of equal-length named columns.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::column::Column;
use crate::error::{ModelError, Result};
use crate::value::Value;

/// An ordered sequence of uniquely named, equal-length columns.
///
/// Tables are values. Every method that changes the shape or contents
/// returns a new table and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, validating unique names and equal lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ModelError::DuplicateColumn(column.name().to_string()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(ModelError::LengthMismatch {
                    column: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows (zero for a table without columns).
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in left-to-right order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Returns true if a column with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Column names in left-to-right order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Values of one row, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.height() {
            return None;
        }
        Some(self.columns.iter().filter_map(|c| c.get(idx)).collect())
    }

    /// Return a table with `column` replacing the same-named column in place,
    /// or appended on the right when no such column exists.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        let mut columns = self.columns.clone();
        match self.column_index(column.name()) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        Self::new(columns)
    }

    /// Return a table holding only the rows whose mask entry is true.
    pub fn filter_mask(&self, mask: &[bool]) -> Result<Self> {
        if !self.is_empty() && mask.len() != self.height() {
            return Err(ModelError::LengthMismatch {
                column: "<row mask>".to_string(),
                expected: self.height(),
                found: mask.len(),
            });
        }
        Ok(Self {
            columns: self.columns.iter().map(|c| c.masked(mask)).collect(),
        })
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Renders a left-aligned text grid with `NA` for missing values.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.values().iter().map(ToString::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(column, values)| {
                values
                    .iter()
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.name().chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", c.name()))
            .collect();
        writeln!(f, "{}", header.join(" | ").trim_end())?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write!(f, "{}", rule.join("-+-"))?;

        for row in 0..self.height() {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(values, &w)| format!("{:<w$}", values[row]))
                .collect();
            write!(f, "\n{}", line.join(" | ").trim_end())?;
        }
        Ok(())
    }
}

/// Build a [`Table`] from `name => [values...]` pairs.
///
/// Expands to a `tablekit_model::Result<Table>`; each value goes through
/// `Value::from`, so numbers, strings, `Option`s and `Value::Missing` mix
/// freely across (not within) columns.
///
/// ```
/// use tablekit_model::{table, Value};
///
/// let t = table! {
///     "a" => [3, 4, 5],
///     "b" => ["x", "y", "z"],
///     "c" => [Value::Missing, Value::from(1), Value::from(2)],
/// }
/// .unwrap();
/// assert_eq!(t.height(), 3);
/// assert_eq!(t.column_names(), vec!["a", "b", "c"]);
/// ```
#[macro_export]
macro_rules! table {
    ($($name:expr => [$($value:expr),* $(,)?]),* $(,)?) => {
        (|| -> $crate::Result<$crate::Table> {
            $crate::Table::new(vec![
                $($crate::Column::new(
                    $name,
                    vec![$($crate::Value::from($value)),*],
                )?),*
            ])
        })()
    };
}
