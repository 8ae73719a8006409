//! Removal collaborator trait.

use async_trait::async_trait;
use rl_error::Result;
use rl_types::ArchiveItem;
use serde::{Deserialize, Serialize};

/// Trait for backends that delete matched items.
///
/// A remover is told nothing about why an item matched.
#[async_trait]
pub trait ItemRemover: Send + Sync {
    /// Removes `items`.
    ///
    /// Per-item failures are collected in the report. An `Err` means the
    /// remover could not run at all.
    async fn remove(&self, items: &[ArchiveItem]) -> Result<RemovalReport>;
}

/// Outcome of a removal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    /// Names that were removed (or would have been, in a dry run)
    pub removed: Vec<String>,

    /// Names that could not be removed, with the reason
    pub failed: Vec<(String, String)>,

    /// Whether nothing was actually deleted
    pub dry_run: bool,
}

impl RemovalReport {
    /// Create an empty report.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Record a removed item.
    pub fn record_removed(&mut self, name: impl Into<String>) {
        self.removed.push(name.into());
    }

    /// Record an item that could not be removed.
    pub fn record_failure(&mut self, name: impl Into<String>, reason: impl ToString) {
        self.failed.push((name.into(), reason.to_string()));
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
