//! Configuration for a rotation query.

use rl_error::{Result, RlError};
use serde::{Deserialize, Serialize};

use crate::criteria::CriteriaSpec;
use crate::extract::DateSource;
use crate::filter::FilterSpec;

/// Everything a query needs besides the candidates.
///
/// Loaded from TOML:
///
/// ```toml
/// date_source = "name_then_metadata"
///
/// [criteria]
/// before = "5d"
/// except_day = [1, 15]
///
/// [filter]
/// except_first = "day"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationConfig {
    /// Per-item criteria
    #[serde(default)]
    pub criteria: CriteriaSpec,

    /// Optional set filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSpec>,

    /// Where dates are extracted from
    #[serde(default)]
    pub date_source: DateSource,
}

impl RotationConfig {
    /// Create a configuration that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| RlError::config(format!("Invalid configuration: {e}")))
    }

    /// Set the criteria.
    pub fn with_criteria(mut self, criteria: CriteriaSpec) -> Self {
        self.criteria = criteria;
        self
    }

    /// Set the set filter.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the date source.
    pub fn with_date_source(mut self, source: DateSource) -> Self {
        self.date_source = source;
        self
    }
}
