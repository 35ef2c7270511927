//! Column selection helpers that resolve to a [`ColumnSet`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use tablekit_model::{Column, ColumnKind, ColumnSet, Table};

use crate::error::{Result, TransformError};

/// Describes which columns an operation targets.
///
/// Pattern and kind selectors resolve in table order; `Names` keeps the
/// order it was given and is checked later by the consuming operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelector {
    /// Explicit names.
    Names(Vec<String>),
    /// Names starting with a prefix.
    StartsWith(String),
    /// Names ending with a suffix.
    EndsWith(String),
    /// Names matching a regular expression (unanchored).
    Matches(String),
    /// Columns of a given kind.
    Kind(ColumnKind),
    /// Every column.
    All,
}

impl ColumnSelector {
    /// Explicit names selector.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSelector::Names(names.into_iter().map(Into::into).collect())
    }

    /// Resolve against a table.
    ///
    /// # Errors
    ///
    /// - [`TransformError::InvalidPattern`] for a bad regular expression.
    /// - [`TransformError::EmptySelection`] when nothing is selected.
    pub fn resolve(&self, table: &Table) -> Result<ColumnSet> {
        let selected: Vec<&str> = match self {
            ColumnSelector::Names(names) => names.iter().map(String::as_str).collect(),
            ColumnSelector::StartsWith(prefix) => table
                .column_names()
                .into_iter()
                .filter(|name| name.starts_with(prefix.as_str()))
                .collect(),
            ColumnSelector::EndsWith(suffix) => table
                .column_names()
                .into_iter()
                .filter(|name| name.ends_with(suffix.as_str()))
                .collect(),
            ColumnSelector::Matches(pattern) => {
                let regex = Regex::new(pattern).map_err(|source| TransformError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                table
                    .column_names()
                    .into_iter()
                    .filter(|name| regex.is_match(name))
                    .collect()
            }
            ColumnSelector::Kind(kind) => table
                .columns()
                .iter()
                .filter(|column| column.kind() == *kind)
                .map(Column::name)
                .collect(),
            ColumnSelector::All => table.column_names(),
        };

        ColumnSet::new(selected).map_err(|_| TransformError::EmptySelection(self.describe()))
    }

    fn describe(&self) -> String {
        match self {
            ColumnSelector::Names(_) => "names([])".to_string(),
            ColumnSelector::StartsWith(prefix) => format!("starts_with({prefix:?})"),
            ColumnSelector::EndsWith(suffix) => format!("ends_with({suffix:?})"),
            ColumnSelector::Matches(pattern) => format!("matches({pattern:?})"),
            ColumnSelector::Kind(kind) => format!("kind({kind})"),
            ColumnSelector::All => "all()".to_string(),
        }
    }
}

/// Keep only the named columns, in column set order.
pub fn select(table: &Table, columns: &ColumnSet) -> Result<Table> {
    let unknown: Vec<String> = columns
        .iter()
        .filter(|name| !table.contains(name))
        .map(str::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(TransformError::UnknownColumn { names: unknown });
    }
    let kept: Vec<Column> = columns
        .iter()
        .filter_map(|name| table.column(name).cloned())
        .collect();
    Ok(Table::new(kept)?)
}

impl From<ColumnSet> for ColumnSelector {
    fn from(set: ColumnSet) -> Self {
        ColumnSelector::Names(set.into())
    }
}

#[cfg(test)]
mod tests {
    use tablekit_model::table;

    use super::*;

    fn sample() -> Table {
        table! {
            "id" => [1, 2],
            "x_raw" => ["1", "a2"],
            "y_raw" => ["3", "4"],
            "score" => [0.5, 0.7],
        }
        .unwrap()
    }

    #[test]
    fn test_patterns_resolve_in_table_order() {
        let table = sample();
        let set = ColumnSelector::EndsWith("_raw".into()).resolve(&table).unwrap();
        assert_eq!(set.names(), &["x_raw", "y_raw"]);
        let set = ColumnSelector::Matches("^[xy]_".into()).resolve(&table).unwrap();
        assert_eq!(set.names(), &["x_raw", "y_raw"]);
        let set = ColumnSelector::StartsWith("s".into()).resolve(&table).unwrap();
        assert_eq!(set.names(), &["score"]);
    }

    #[test]
    fn test_kind_selector() {
        let set = ColumnSelector::Kind(ColumnKind::Numeric)
            .resolve(&sample())
            .unwrap();
        assert_eq!(set.names(), &["id", "score"]);
    }

    #[test]
    fn test_names_keep_given_order_without_checking() {
        let set = ColumnSelector::names(["score", "missing"])
            .resolve(&sample())
            .unwrap();
        assert_eq!(set.names(), &["score", "missing"]);
    }

    #[test]
    fn test_empty_selection() {
        let err = ColumnSelector::StartsWith("zz".into())
            .resolve(&sample())
            .unwrap_err();
        assert_eq!(err.to_string(), r#"Selector starts_with("zz") matched no columns"#);
    }

    #[test]
    fn test_invalid_regex() {
        let err = ColumnSelector::Matches("(".into())
            .resolve(&sample())
            .unwrap_err();
        assert!(matches!(err, TransformError::InvalidPattern { .. }));
    }

    #[test]
    fn test_select_reorders_and_checks() {
        let table = sample();
        let set = ColumnSet::new(["score", "id"]).unwrap();
        let selected = select(&table, &set).unwrap();
        assert_eq!(selected.column_names(), vec!["score", "id"]);
        assert_eq!(selected.height(), 2);

        let err = select(&table, &ColumnSet::single("nope")).unwrap_err();
        assert!(matches!(err, TransformError::UnknownColumn { .. }));
    }

    #[test]
    fn test_json_shape() {
        let selector: ColumnSelector = serde_json::from_str(r#"{"ends_with": "_raw"}"#).unwrap();
        assert_eq!(selector, ColumnSelector::EndsWith("_raw".into()));
        let all: ColumnSelector = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(all, ColumnSelector::All);
        let kind: ColumnSelector = serde_json::from_str(r#"{"kind": "text"}"#).unwrap();
        assert_eq!(kind, ColumnSelector::Kind(ColumnKind::Text));
    }
}
