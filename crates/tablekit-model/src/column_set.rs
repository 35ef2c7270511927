//! Ordered sets of column names targeted by an operation.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A non-empty, duplicate-free list of column names.
///
/// Iteration follows insertion order; repeated names keep their first
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    /// Build a column set from names.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        if unique.is_empty() {
            return Err(ModelError::EmptyColumnSet);
        }
        Ok(Self { names: unique })
    }

    /// A set holding one column.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    /// Names in iteration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over the names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns true if the set names this column.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TryFrom<Vec<String>> for ColumnSet {
    type Error = ModelError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<ColumnSet> for Vec<String> {
    fn from(set: ColumnSet) -> Self {
        set.names
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}
