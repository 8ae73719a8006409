//! Listing collaborator trait.

use async_trait::async_trait;
use rl_error::Result;
use rl_types::ArchiveItem;

/// Trait for backends that enumerate rotation candidates.
///
/// Implementations set the item name and, when cheaply available, a known
/// timestamp or fallback metadata. Date extraction is left to the engine.
///
/// # Implementations
///
/// - Local directory listing (`rl-source-fs`)
/// - [`StaticSource`]: items the caller already holds, such as table names
///   fetched over an existing database connection
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Lists candidate items.
    async fn list(&self) -> Result<Vec<ArchiveItem>>;

    /// Human-readable description of where items come from.
    fn description(&self) -> String;
}

/// A source over an in-memory list of items.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    items: Vec<ArchiveItem>,
}

impl StaticSource {
    /// Create a source returning `items`.
    pub fn new(items: Vec<ArchiveItem>) -> Self {
        Self { items }
    }

    /// Create a source from bare names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(ArchiveItem::new).collect())
    }
}

#[async_trait]
impl ItemSource for StaticSource {
    async fn list(&self) -> Result<Vec<ArchiveItem>> {
        Ok(self.items.clone())
    }

    fn description(&self) -> String {
        format!("static({} items)", self.items.len())
    }
}
