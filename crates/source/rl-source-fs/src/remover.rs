//! File removal.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rl_error::{RemovalError, Result};
use rl_traits::{ItemRemover, RemovalReport};
use rl_types::ArchiveItem;
use tracing::{info, warn};

/// Deletes matched files from a directory.
///
/// Item names are resolved relative to the directory; names with path
/// separators are refused. In dry-run mode nothing is deleted and every item
/// is reported as removed.
#[derive(Debug, Clone)]
pub struct FsRemover {
    directory: PathBuf,
    dry_run: bool,
}

impl FsRemover {
    /// Create a remover for `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            dry_run: false,
        }
    }

    /// Report instead of deleting.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The directory items are removed from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl ItemRemover for FsRemover {
    async fn remove(&self, items: &[ArchiveItem]) -> Result<RemovalReport> {
        tokio::fs::metadata(&self.directory)
            .await
            .map_err(RemovalError::from)?;

        let mut report = RemovalReport::new(self.dry_run);
        for item in items {
            let name = item.name();
            if name.contains(std::path::is_separator) || name == ".." || name == "." {
                warn!(item = %name, "Refusing to remove item outside directory");
                report.record_failure(name, "name is not a plain file name");
                continue;
            }

            if self.dry_run {
                info!(item = %name, "Would remove");
                report.record_removed(name);
                continue;
            }

            match tokio::fs::remove_file(self.directory.join(name)).await {
                Ok(()) => {
                    info!(item = %name, "Removed");
                    report.record_removed(name);
                }
                Err(e) => {
                    let err = RemovalError::from(e);
                    warn!(item = %name, error = %err, "Failed to remove");
                    report.record_failure(name, err);
                }
            }
        }
        Ok(report)
    }
}
