//! The archive item descriptor.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A candidate for rotation: a backup file, a dated table, an object key or a
/// snapshot id.
///
/// The timestamp is absent until resolved. Once resolved it never changes:
/// [`ArchiveItem::resolve_with`] only fills an empty slot, so a timestamp
/// supplied by a collaborator always wins over extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveItem {
    /// Identifier of the item (filename, table name, object key, snapshot id)
    name: String,

    /// Resolved point in time, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,

    /// Free-text fallback source for date extraction (e.g. a snapshot description)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_metadata: Option<String>,
}

impl ArchiveItem {
    /// Create an item with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: None,
            raw_metadata: None,
        }
    }

    /// Attach a timestamp the collaborator already knows.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach fallback metadata for date extraction.
    pub fn with_raw_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.raw_metadata = Some(metadata.into());
        self
    }

    /// The item identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved timestamp, if any.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Fallback metadata, if any.
    pub fn raw_metadata(&self) -> Option<&str> {
        self.raw_metadata.as_deref()
    }

    /// Whether a timestamp has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Resolve the timestamp with `resolver` unless it is already set.
    ///
    /// Returns the timestamp the item ends up with.
    pub fn resolve_with<F>(&mut self, resolver: F) -> Option<Timestamp>
    where
        F: FnOnce(&str, Option<&str>) -> Option<Timestamp>,
    {
        if self.timestamp.is_none() {
            self.timestamp = resolver(&self.name, self.raw_metadata.as_deref());
        }
        self.timestamp
    }
}

impl From<&str> for ArchiveItem {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ArchiveItem {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
