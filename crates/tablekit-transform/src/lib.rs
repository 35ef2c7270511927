//! Column transformations and row filters for tablekit tables.
//!
//! # Overview
//!
//! This crate provides:
//! - **transform**: apply one [`Transformation`] across a [`ColumnSet`],
//!   in place or into derived columns ([`transform`], [`ColumnTransformer`])
//! - **numeric**: rebuild numeric columns from digit-only text
//!   ([`classify_numeric`])
//! - **filter**: keep rows matching predicates stored as data
//!   ([`filter_rows`], [`Predicate`])
//! - **selector**: resolve column sets by name, pattern or kind
//! - **builtin**: transformations addressable by name from configuration
//! - **pipeline**: JSON-configurable chains of mutate/filter/select steps
//! - **frame**: conversion to and from Polars DataFrames
//!
//! # Example
//!
//! ```
//! use tablekit_model::{ColumnSet, NamingRule, Value, table};
//! use tablekit_transform::{Predicate, elementwise_with, filter_rows, transform};
//!
//! let table = table! {
//!     "a" => [3, 4, 5],
//!     "b" => [2, 5, 8],
//! }
//! .unwrap();
//!
//! // "if a == 3 then missing else a + a", into a new column a_a.
//! let doubled = elementwise_with(|a, b| {
//!     Ok(match (a, b) {
//!         (Value::Number(x), _) if *x == 3.0 => Value::Missing,
//!         (Value::Number(x), Value::Number(y)) => Value::Number(x + y),
//!         _ => Value::Missing,
//!     })
//! });
//! let out = transform(
//!     &table,
//!     &ColumnSet::single("a"),
//!     &doubled,
//!     &NamingRule::suffixed("_a").unwrap(),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(
//!     out.column("a_a").unwrap().values(),
//!     &[Value::Missing, Value::from(8), Value::from(10)]
//! );
//!
//! let big = filter_rows(&out, &Predicate::parse("b", ">", 4).unwrap()).unwrap();
//! assert_eq!(big.height(), 2);
//! ```
//!
//! # Design Principles
//!
//! - **Immutable inputs**: every operation returns a new table
//! - **Atomic**: validation and evaluation finish before anything is committed
//! - **Element-wise**: outputs are built value by value into fresh buffers
//! - **Configuration as data**: predicates, naming rules and pipelines are serde types

mod builtin;
mod error;
mod filter;
mod frame;
mod function;
mod numeric;
mod pipeline;
mod selector;
mod transform;

// Error type
pub use error::{Result, TransformError};

// Transformation contract
pub use function::{
    Elementwise, ElementwiseWith, FunctionError, FunctionResult, Transformation, elementwise,
    elementwise_with,
};

// Core operations
pub use filter::{Operator, Predicate, PredicateConfig, filter_all, filter_rows};
pub use numeric::{ClassifyNumeric, classify_numeric, classify_value, is_digit_string};
pub use transform::{ColumnTransformer, transform};

// Selection and configuration
pub use builtin::BuiltinFunction;
pub use pipeline::{FilterStep, MutateStep, Pipeline, SelectStep, Step};
pub use selector::{ColumnSelector, select};

// Polars interop
pub use frame::{table_from_dataframe, table_to_dataframe};
