//! Column-oriented table model.
//!
//! This crate defines the values the transformation crate operates on:
//!
//! - **value**: cell values ([`Value`]) and column kinds ([`ColumnKind`])
//! - **column**: named single-kind columns ([`Column`])
//! - **table**: ordered, equal-length column collections ([`Table`])
//! - **column_set**: targeted column names ([`ColumnSet`])
//! - **naming**: in-place vs derived output naming ([`NamingRule`])
//!
//! Every type is an immutable value: operations return new tables rather
//! than mutating their input.

pub mod column;
pub mod column_set;
pub mod error;
pub mod naming;
pub mod table;
pub mod value;

pub use column::Column;
pub use column_set::ColumnSet;
pub use error::{ModelError, Result};
pub use naming::{NAME_PLACEHOLDER, NamingRule};
pub use table::Table;
pub use value::{ColumnKind, Value};
