//! Shared fixtures for integration tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rl_error::Result;
use rl_traits::{ItemRemover, RemovalReport};
use rl_types::ArchiveItem;
use tempfile::TempDir;

/// Create a temporary directory holding empty files named `names`.
pub fn directory_with(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for name in names {
        std::fs::write(dir.path().join(name), b"backup").expect("write fixture");
    }
    dir
}

/// Names of the files left in `dir`, sorted.
pub fn remaining(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();
    names
}

/// Names of `items`, in order.
pub fn names(items: &[ArchiveItem]) -> Vec<&str> {
    items.iter().map(|i| i.name()).collect()
}

/// Remover that records what it was asked to remove.
#[derive(Default, Clone)]
pub struct CollectingRemover {
    removed: Arc<Mutex<Vec<String>>>,
}

impl CollectingRemover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemRemover for CollectingRemover {
    async fn remove(&self, items: &[ArchiveItem]) -> Result<RemovalReport> {
        let mut report = RemovalReport::new(false);
        let mut removed = self.removed.lock().unwrap();
        for item in items {
            removed.push(item.name().to_string());
            report.record_removed(item.name());
        }
        Ok(report)
    }
}
