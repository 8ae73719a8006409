//! Set filters.
//!
//! A set filter runs after per-item criteria and looks at the whole matched
//! list. Items are bucketed by their timestamp truncated to a [`Granularity`];
//! within each bucket one extremal member is spared and the rest are kept as
//! rotation candidates. Undated items cannot be bucketed and pass through.

mod granularity;

pub use granularity::{Bucket, Granularity};

use std::collections::{HashMap, HashSet};

use rl_error::{Result, RlError};
use rl_types::{ArchiveItem, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A whole-list filter.
///
/// Deserializes from `{ except_first = "day" }` or `{ except_last = "month" }`.
///
/// # Example
///
/// ```
/// use rl_rotator::{FilterSpec, Granularity};
/// use rl_types::ArchiveItem;
///
/// let item = |name: &str, ts: &str| ArchiveItem::new(name).with_timestamp(ts.parse().unwrap());
/// let items = vec![
///     item("a", "2020-01-01T01:00:00"),
///     item("b", "2020-01-01T02:00:00"),
///     item("c", "2020-01-02T01:00:00"),
/// ];
///
/// let kept = FilterSpec::ExceptFirst(Granularity::Day).apply(items);
/// let names: Vec<&str> = kept.iter().map(|i| i.name()).collect();
/// assert_eq!(names, vec!["b"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSpec {
    /// Drop the earliest member of each bucket, keep the rest
    ExceptFirst(Granularity),

    /// Drop the latest member of each bucket, keep the rest
    ExceptLast(Granularity),
}

impl FilterSpec {
    /// Build from a key and a granularity name.
    pub fn parse(key: &str, granularity: &str) -> Result<Self> {
        let granularity: Granularity = granularity.parse()?;
        match key {
            "except_first" => Ok(Self::ExceptFirst(granularity)),
            "except_last" => Ok(Self::ExceptLast(granularity)),
            other => Err(RlError::config(format!(
                "Unknown filter '{other}'. Expected 'except_first' or 'except_last'"
            ))),
        }
    }

    /// Configuration key of this filter.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ExceptFirst(_) => "except_first",
            Self::ExceptLast(_) => "except_last",
        }
    }

    /// Bucket granularity.
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::ExceptFirst(g) | Self::ExceptLast(g) => *g,
        }
    }

    /// Apply the filter, preserving the relative order of surviving items.
    ///
    /// Ties on timestamp are broken by input position: `except_first` spares
    /// the earliest-listed of the earliest items, `except_last` the
    /// latest-listed of the latest.
    pub fn apply(&self, items: Vec<ArchiveItem>) -> Vec<ArchiveItem> {
        let granularity = self.granularity();
        let mut buckets: HashMap<Bucket, Vec<(Timestamp, usize)>> = HashMap::new();
        for (position, item) in items.iter().enumerate() {
            if let Some(ts) = item.timestamp() {
                buckets
                    .entry(granularity.bucket(ts))
                    .or_default()
                    .push((ts, position));
            }
        }

        let spared: HashSet<usize> = buckets
            .values()
            .filter_map(|members| match self {
                Self::ExceptFirst(_) => members.iter().min(),
                Self::ExceptLast(_) => members.iter().max(),
            })
            .map(|(_, position)| *position)
            .collect();

        debug!(
            filter = self.key(),
            granularity = %granularity,
            buckets = buckets.len(),
            "Applying set filter"
        );

        items
            .into_iter()
            .enumerate()
            .filter(|(position, _)| !spared.contains(position))
            .map(|(_, item)| item)
            .collect()
    }

    /// Human-readable description, used in logs.
    pub fn description(&self) -> String {
        format!("{}({})", self.key(), self.granularity())
    }
}
