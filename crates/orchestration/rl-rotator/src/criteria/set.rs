//! AND-combination of criteria.

use chrono::Local;
use rl_error::Result;
use rl_types::{ArchiveItem, Timestamp};
use tracing::debug;

use super::{Criterion, CriteriaSpec};

/// Every configured criterion for one query, combined with AND logic.
///
/// An empty set keeps every item. Relative `before`/`after` bounds are
/// resolved against a single anchor when the set is built.
///
/// # Example
///
/// ```
/// use rl_rotator::{CriteriaSet, Criterion};
/// use rl_types::ArchiveItem;
///
/// let set = CriteriaSet::new()
///     .with_criterion(Criterion::starts_with(["db_"]).unwrap())
///     .with_criterion(Criterion::year([2020]).unwrap());
///
/// let kept = set.evaluate(vec![
///     ArchiveItem::new("db_x").with_timestamp("2020-05-01T00:00:00".parse().unwrap()),
///     ArchiveItem::new("web_x").with_timestamp("2020-05-01T00:00:00".parse().unwrap()),
/// ]);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name(), "db_x");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl CriteriaSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration, anchoring relative bounds at the current
    /// local time.
    pub fn from_spec(spec: &CriteriaSpec) -> Result<Self> {
        Self::from_spec_at(spec, Local::now().naive_local())
    }

    /// Build from configuration, anchoring relative bounds at `anchor`.
    ///
    /// Fails with a configuration error for out-of-range values, empty lists,
    /// bad regexes and bounds that overflow the calendar.
    pub fn from_spec_at(spec: &CriteriaSpec, anchor: Timestamp) -> Result<Self> {
        let mut set = Self::new();

        if let Some(bound) = &spec.before {
            set.add(Criterion::Before(bound.resolve(anchor)?));
        }
        if let Some(bound) = &spec.after {
            set.add(Criterion::After(bound.resolve(anchor)?));
        }
        if let Some(flag) = spec.has_date {
            set.add(Criterion::HasDate(flag));
        }
        if let Some(dates) = &spec.date {
            set.add(Criterion::date(dates.clone().into_vec())?);
        }
        if let Some(days) = &spec.day {
            set.add(Criterion::day(days.clone().into_vec())?);
        }
        if let Some(days) = &spec.except_day {
            set.add(Criterion::except_day(days.clone().into_vec())?);
        }
        if let Some(hours) = &spec.hour {
            set.add(Criterion::hour(hours.clone().into_vec())?);
        }
        if let Some(hours) = &spec.except_hour {
            set.add(Criterion::except_hour(hours.clone().into_vec())?);
        }
        if let Some(years) = &spec.year {
            set.add(Criterion::year(years.clone().into_vec())?);
        }
        if let Some(years) = &spec.except_year {
            set.add(Criterion::except_year(years.clone().into_vec())?);
        }
        if let Some(prefixes) = &spec.startswith {
            set.add(Criterion::starts_with(prefixes.clone().into_vec())?);
        }
        if let Some(prefixes) = &spec.except_startswith {
            set.add(Criterion::except_starts_with(prefixes.clone().into_vec())?);
        }
        if let Some(suffixes) = &spec.endswith {
            set.add(Criterion::ends_with(suffixes.clone().into_vec())?);
        }
        if let Some(suffixes) = &spec.except_endswith {
            set.add(Criterion::except_ends_with(suffixes.clone().into_vec())?);
        }
        if let Some(pattern) = &spec.pattern {
            set.add(Criterion::pattern(pattern)?);
        }

        Ok(set)
    }

    /// Add a criterion (builder pattern).
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.add(criterion);
        self
    }

    /// Add a criterion.
    pub fn add(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the set places no constraint.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// The criteria in the set.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Whether every criterion accepts the item.
    pub fn matches(&self, item: &ArchiveItem) -> bool {
        self.first_rejection(item).is_none()
    }

    /// The first criterion that rejects the item, if any.
    pub fn first_rejection(&self, item: &ArchiveItem) -> Option<&Criterion> {
        self.criteria.iter().find(|c| !c.matches_item(item))
    }

    /// Keep the items every criterion accepts, preserving input order.
    pub fn evaluate(&self, items: Vec<ArchiveItem>) -> Vec<ArchiveItem> {
        items
            .into_iter()
            .filter(|item| match self.first_rejection(item) {
                Some(criterion) => {
                    debug!(item = %item.name(), criterion = criterion.key(), "Item rejected");
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Descriptions of all criteria.
    pub fn descriptions(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.description()).collect()
    }

    /// Combined description, used in logs.
    pub fn description(&self) -> String {
        if self.criteria.is_empty() {
            "criteria(any)".to_string()
        } else {
            format!("criteria({})", self.descriptions().join(" AND "))
        }
    }
}
