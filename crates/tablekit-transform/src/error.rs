//! Error types for the transformation system.

use tablekit_model::ModelError;
use thiserror::Error;

/// Errors that can occur while transforming or filtering a table.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// One or more referenced columns are absent from the table.
    #[error("Unknown column(s): {}", names.join(", "))]
    UnknownColumn {
        /// Every missing name, in reference order.
        names: Vec<String>,
    },

    /// A derived output name collides with an existing, non-targeted column.
    #[error("Derived column {name} collides with an existing column")]
    DuplicateColumn {
        /// The colliding output name.
        name: String,
    },

    /// The transformation failed, or returned an unusable result, for a column.
    #[error("Transformation failed for {column}: {message}")]
    Transformation {
        /// Source column being transformed.
        column: String,
        /// Description of the failure.
        message: String,
    },

    /// A predicate operator outside the supported set.
    #[error("Invalid comparison operator: {0:?}")]
    InvalidOperator(String),

    /// A built-in transformation name that is not recognized.
    #[error("Unknown transformation: {0:?}")]
    UnknownFunction(String),

    /// An auxiliary column was given to a transformation that never reads one.
    #[error("Transformation {function} does not take an auxiliary column")]
    UnusedAuxiliary {
        /// Name of the transformation.
        function: String,
    },

    /// A column selector pattern is not a valid regular expression.
    #[error("Invalid column pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A pattern or kind selector matched no columns.
    #[error("Selector {0} matched no columns")]
    EmptySelection(String),

    /// The input table has no columns.
    #[error("Cannot transform a table without columns")]
    EmptyTable,

    /// A pipeline step failed.
    #[error("Pipeline step {index} failed: {source}")]
    Step {
        /// Zero-based step position.
        index: usize,
        /// Underlying failure.
        #[source]
        source: Box<TransformError>,
    },

    /// A table model invariant was violated.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Pipeline configuration could not be parsed.
    #[error("Invalid pipeline configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl TransformError {
    /// Shorthand for a single unknown column.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        TransformError::UnknownColumn {
            names: vec![name.into()],
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
