//! Name-based item classification.

use serde::{Deserialize, Serialize};

/// Which names a listing collaborator should hand to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Compressed archives (`.gz`, `.bz2`, `.zip`, `.tgz`)
    #[default]
    Archive,

    /// Log files (`.log`)
    Log,

    /// Anything whose name carries an extractable date (the dated-table rule)
    Dated,

    /// Every name
    Any,
}

impl ItemKind {
    /// Glob patterns a name must match for this kind.
    ///
    /// Empty for kinds that are not decided by name shape alone.
    pub fn patterns(&self) -> &[&str] {
        match self {
            ItemKind::Archive => &["*.gz", "*.bz2", "*.zip", "*.tgz"],
            ItemKind::Log => &["*.log"],
            ItemKind::Dated | ItemKind::Any => &[],
        }
    }

    /// Whether membership requires a date extracted from the name.
    pub fn requires_date(&self) -> bool {
        matches!(self, ItemKind::Dated)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Archive => write!(f, "archive"),
            Self::Log => write!(f, "log"),
            Self::Dated => write!(f, "dated"),
            Self::Any => write!(f, "any"),
        }
    }
}
