//! Error types for the table model.

use thiserror::Error;

/// Errors raised when a model invariant would be violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Two columns in one table share a name.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length differs from the table height.
    #[error("column {column} has {found} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column.
        column: String,
        /// Height of the table.
        expected: usize,
        /// Length of the offending column.
        found: usize,
    },

    /// A column holds both numbers and text.
    #[error("column {column} mixes numeric and text values (row {row} disagrees)")]
    MixedKinds {
        /// Offending column.
        column: String,
        /// First row whose kind disagrees with the column.
        row: usize,
    },

    /// A derived naming template does not contain exactly one `{name}` placeholder.
    #[error("naming template {0:?} must contain exactly one {{name}} placeholder")]
    InvalidTemplate(String),

    /// A column set was built from no names.
    #[error("column set must name at least one column")]
    EmptyColumnSet,
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
