//! Named, single-kind columns.

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::value::{ColumnKind, Value};

/// A named sequence of values sharing one [`ColumnKind`].
///
/// Missing markers may appear anywhere. The remaining values must be all
/// numbers or all text; [`Column::new`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, validating that its values share one kind.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        infer_kind(&name, &values)?;
        Ok(Self { name, values })
    }

    /// Create a column from anything convertible into [`Value`].
    pub fn from_values<I, V>(name: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column values in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a row, if in range.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Kind shared by the non-missing values.
    pub fn kind(&self) -> ColumnKind {
        self.values
            .iter()
            .map(Value::kind)
            .find(|kind| *kind != ColumnKind::Missing)
            .unwrap_or(ColumnKind::Missing)
    }

    /// Count of missing markers.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Keep the rows whose mask entry is true.
    ///
    /// The caller guarantees `mask.len() == self.len()`.
    pub(crate) fn masked(&self, mask: &[bool]) -> Self {
        let values = self
            .values
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(value, _)| value.clone())
            .collect();
        Self {
            name: self.name.clone(),
            values,
        }
    }
}

fn infer_kind(name: &str, values: &[Value]) -> Result<ColumnKind> {
    let mut kind = ColumnKind::Missing;
    for (row, value) in values.iter().enumerate() {
        let value_kind = value.kind();
        if value_kind == ColumnKind::Missing {
            continue;
        }
        if kind == ColumnKind::Missing {
            kind = value_kind;
        } else if kind != value_kind {
            return Err(ModelError::MixedKinds {
                column: name.to_string(),
                row,
            });
        }
    }
    Ok(kind)
}
