//! Output naming policies for transformed columns.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Placeholder substituted with the source column name in derived templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Decides where a transformed column is written.
///
/// - `InPlace` overwrites the source column.
/// - `Derived` writes a new column named by substituting the source name
///   into `template` (e.g. `new_{name}`), keeping the source column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum NamingRule {
    /// Overwrite the source column.
    #[default]
    InPlace,
    /// Write to a new column named from `template`.
    Derived {
        /// Template with exactly one `{name}` placeholder.
        template: String,
    },
}

impl NamingRule {
    /// Derived naming from a template, validated.
    pub fn derived(template: impl Into<String>) -> Result<Self> {
        let rule = NamingRule::Derived {
            template: template.into(),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Derived naming that prepends `prefix`.
    pub fn prefixed(prefix: &str) -> Result<Self> {
        Self::derived(format!("{prefix}{NAME_PLACEHOLDER}"))
    }

    /// Derived naming that appends `suffix`.
    pub fn suffixed(suffix: &str) -> Result<Self> {
        Self::derived(format!("{NAME_PLACEHOLDER}{suffix}"))
    }

    /// Check the template, if any, has exactly one placeholder.
    ///
    /// Rules that arrive through deserialization skip [`NamingRule::derived`],
    /// so consumers call this before use.
    pub fn validate(&self) -> Result<()> {
        match self {
            NamingRule::InPlace => Ok(()),
            NamingRule::Derived { template } => {
                if template.matches(NAME_PLACEHOLDER).count() == 1 {
                    Ok(())
                } else {
                    Err(ModelError::InvalidTemplate(template.clone()))
                }
            }
        }
    }

    /// Returns true for in-place naming.
    pub fn is_in_place(&self) -> bool {
        matches!(self, NamingRule::InPlace)
    }

    /// Output column name for a source column.
    pub fn output_name(&self, name: &str) -> String {
        match self {
            NamingRule::InPlace => name.to_string(),
            NamingRule::Derived { template } => template.replacen(NAME_PLACEHOLDER, name, 1),
        }
    }
}
