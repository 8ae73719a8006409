//! Directory listing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use glob::Pattern;
use rl_error::{Result, SourceError};
use rl_rotator::DateExtractor;
use rl_traits::ItemSource;
use rl_types::{ArchiveItem, ItemKind};
use tracing::{debug, warn};

/// Lists the regular files of a directory.
///
/// Files are filtered by [`ItemKind`]: archives and logs by extension, dated
/// items by whether the name carries a date. Results are sorted by name so
/// that the engine sees a stable input order.
///
/// Symlinks to regular files are listed under the link's name. Links to
/// directories and dangling links are skipped.
///
/// When `mtime_fallback` is set, each item carries its modification time as
/// RFC 3339 fallback metadata, used when the name has no date. For a symlink
/// this is the target's modification time.
#[derive(Debug, Clone)]
pub struct FsSource {
    directory: PathBuf,
    kind: ItemKind,
    patterns: Vec<Pattern>,
    extractor: DateExtractor,
    mtime_fallback: bool,
}

impl FsSource {
    /// Create a source listing archives in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            kind: ItemKind::default(),
            patterns: compile(ItemKind::default()),
            extractor: DateExtractor::new(),
            mtime_fallback: false,
        }
    }

    /// Set which kind of file to list.
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self.patterns = compile(kind);
        self
    }

    /// Attach each file's modification time as fallback metadata.
    pub fn with_mtime_fallback(mut self, enabled: bool) -> Self {
        self.mtime_fallback = enabled;
        self
    }

    /// The directory being listed.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether `name` belongs to the configured kind.
    pub fn accepts(&self, name: &str) -> bool {
        if self.kind.requires_date() {
            return self.extractor.has_date(name);
        }
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(name))
    }
}

fn compile(kind: ItemKind) -> Vec<Pattern> {
    kind.patterns()
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect()
}

#[async_trait]
impl ItemSource for FsSource {
    async fn list(&self) -> Result<Vec<ArchiveItem>> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(SourceError::from)?;

        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(SourceError::from)? {
            let file_type = entry.file_type().await.map_err(SourceError::from)?;
            let is_file = if file_type.is_symlink() {
                match tokio::fs::metadata(entry.path()).await {
                    Ok(target) => target.is_file(),
                    Err(e) => {
                        debug!(path = ?entry.path(), error = %e, "Skipping dangling symlink");
                        false
                    }
                }
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = ?entry.path(), "Skipping file with non UTF-8 name");
                continue;
            };
            if !self.accepts(&name) {
                continue;
            }

            let mut item = ArchiveItem::new(name);
            if self.mtime_fallback {
                let metadata = tokio::fs::metadata(entry.path())
                    .await
                    .map_err(SourceError::from)?;
                if let Ok(modified) = metadata.modified() {
                    let modified: DateTime<Local> = modified.into();
                    item = item.with_raw_metadata(modified.to_rfc3339());
                }
            }
            items.push(item);
        }

        items.sort_by(|a, b| a.name().cmp(b.name()));
        debug!(
            directory = %self.directory.display(),
            kind = %self.kind,
            count = items.len(),
            "Listed candidates"
        );
        Ok(items)
    }

    fn description(&self) -> String {
        format!("fs({}, kind={})", self.directory.display(), self.kind)
    }
}
