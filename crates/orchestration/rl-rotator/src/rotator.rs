//! The listing operation: extract dates, apply criteria, apply the set filter.

use chrono::Local;
use rl_error::Result;
use rl_types::{ArchiveItem, Timestamp};
use tracing::{debug, info};

use crate::config::RotationConfig;
use crate::criteria::CriteriaSet;
use crate::extract::{DateExtractor, DateSource};
use crate::filter::FilterSpec;
use crate::stats::RotationStats;

/// Result of one pass.
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    /// Items to rotate, in input order
    pub items: Vec<ArchiveItem>,

    /// Counters for the pass
    pub stats: RotationStats,
}

/// Decides which items to rotate.
///
/// Performs no I/O: candidates come in from a listing collaborator and the
/// result goes out to a removal collaborator.
///
/// # Example
///
/// ```
/// use rl_rotator::{CriteriaSpec, FilterSpec, Granularity, Rotator, RotationConfig};
/// use rl_types::ArchiveItem;
///
/// let config = RotationConfig::new()
///     .with_criteria(CriteriaSpec::from_json(serde_json::json!({ "year": 2020 })).unwrap())
///     .with_filter(FilterSpec::ExceptLast(Granularity::Month));
/// let rotator = Rotator::from_config(&config).unwrap();
///
/// let candidates = ["db_2020-01-01", "db_2020-01-15", "db_2021-01-01", "notes.txt"]
///     .into_iter()
///     .map(ArchiveItem::new)
///     .collect();
///
/// let rotate = rotator.list_items(candidates);
/// assert_eq!(rotate.len(), 1);
/// assert_eq!(rotate[0].name(), "db_2020-01-01");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rotator {
    criteria: CriteriaSet,
    filter: Option<FilterSpec>,
    extractor: DateExtractor,
    date_source: DateSource,
}

impl Rotator {
    /// Create a rotator with the given criteria, no set filter, and the
    /// default date source.
    pub fn new(criteria: CriteriaSet) -> Self {
        Self {
            criteria,
            ..Default::default()
        }
    }

    /// Build from configuration, anchoring relative bounds at the current
    /// local time.
    pub fn from_config(config: &RotationConfig) -> Result<Self> {
        Self::from_config_at(config, Local::now().naive_local())
    }

    /// Build from configuration, anchoring relative bounds at `anchor`.
    pub fn from_config_at(config: &RotationConfig, anchor: Timestamp) -> Result<Self> {
        let criteria = CriteriaSet::from_spec_at(&config.criteria, anchor)?;
        let mut rotator = Self::new(criteria).with_date_source(config.date_source);
        if let Some(filter) = config.filter {
            rotator = rotator.with_filter(filter);
        }
        Ok(rotator)
    }

    /// Set the set filter.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the date source policy.
    pub fn with_date_source(mut self, source: DateSource) -> Self {
        self.date_source = source;
        self
    }

    /// Replace the date extractor.
    pub fn with_extractor(mut self, extractor: DateExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The criteria in use.
    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    /// The set filter in use, if any.
    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Resolve timestamps for items that lack one. Supplied timestamps are
    /// left untouched.
    pub fn resolve(&self, items: &mut [ArchiveItem]) {
        for item in items.iter_mut() {
            item.resolve_with(|name, meta| {
                self.extractor.extract_from(self.date_source, name, meta)
            });
        }
    }

    /// List the items to rotate.
    pub fn list_items(&self, candidates: Vec<ArchiveItem>) -> Vec<ArchiveItem> {
        self.run(candidates).items
    }

    /// List the items to rotate, with statistics.
    pub fn run(&self, mut candidates: Vec<ArchiveItem>) -> RotationOutcome {
        let mut stats = RotationStats::new();
        self.resolve(&mut candidates);

        let mut matched = Vec::with_capacity(candidates.len());
        for item in candidates {
            stats.record_candidate(item.is_resolved());
            match self.criteria.first_rejection(&item) {
                Some(criterion) => {
                    debug!(
                        item = %item.name(),
                        timestamp = ?item.timestamp(),
                        criterion = %criterion.description(),
                        "Item rejected"
                    );
                    stats.record_rejection(criterion.key());
                }
                None => matched.push(item),
            }
        }

        let matched_count = matched.len();
        let items = match &self.filter {
            Some(filter) => filter.apply(matched),
            None => matched,
        };
        stats.record_result(matched_count, items.len());

        info!(
            candidates = stats.candidates,
            dated = stats.dated,
            matched = stats.matched,
            filtered_out = stats.filtered_out,
            output = stats.output,
            criteria = %self.criteria.description(),
            filter = %self.filter.map(|f| f.description()).unwrap_or_default(),
            "Rotation pass complete"
        );

        RotationOutcome { items, stats }
    }
}

/// List the items to rotate: resolve dates, apply `criteria`, then `filter`.
pub fn list_items(
    candidates: Vec<ArchiveItem>,
    criteria: &CriteriaSet,
    filter: Option<&FilterSpec>,
) -> Vec<ArchiveItem> {
    let mut rotator = Rotator::new(criteria.clone());
    if let Some(filter) = filter {
        rotator = rotator.with_filter(*filter);
    }
    rotator.list_items(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{CriteriaSpec, Criterion};
    use crate::filter::Granularity;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn items(names: &[&str]) -> Vec<ArchiveItem> {
        names.iter().map(|n| ArchiveItem::new(*n)).collect()
    }

    fn names(items: &[ArchiveItem]) -> Vec<&str> {
        items.iter().map(|i| i.name()).collect()
    }

    fn rotator(criteria: serde_json::Value, anchor: Timestamp) -> Rotator {
        let config =
            RotationConfig::new().with_criteria(CriteriaSpec::from_json(criteria).unwrap());
        Rotator::from_config_at(&config, anchor).unwrap()
    }

    #[test]
    fn test_empty_criteria_returns_input_unchanged() {
        let rotator = Rotator::default();
        let candidates = items(&["z", "b_2020-01-01", "a"]);
        assert_eq!(names(&rotator.list_items(candidates)), vec!["z", "b_2020-01-01", "a"]);
    }

    #[test]
    fn test_supplied_timestamp_wins_over_name() {
        let rotator = rotator(json!({ "year": 2019 }), at(2024, 1, 1));
        let candidates = vec![
            ArchiveItem::new("table_20200101").with_timestamp(at(2019, 6, 1)),
            ArchiveItem::new("table_20200102"),
        ];
        assert_eq!(names(&rotator.list_items(candidates)), vec!["table_20200101"]);
    }

    #[test]
    fn test_metadata_fallback_and_metadata_only() {
        let candidates = vec![
            ArchiveItem::new("snap-1").with_raw_metadata("2020-01-01T10:00:00.000Z"),
            ArchiveItem::new("snap_2021-01-01").with_raw_metadata("2020-01-01T10:00:00.000Z"),
        ];

        let default_source = rotator(json!({ "year": 2020 }), at(2024, 1, 1));
        assert_eq!(names(&default_source.list_items(candidates.clone())), vec!["snap-1"]);

        let metadata_only = default_source.with_date_source(DateSource::MetadataOnly);
        assert_eq!(
            names(&metadata_only.list_items(candidates)),
            vec!["snap-1", "snap_2021-01-01"]
        );
    }

    #[test]
    fn test_criteria_then_filter_scenario() {
        let rotator = rotator(json!({ "startswith": "db_" }), at(2024, 1, 1))
            .with_filter(FilterSpec::ExceptFirst(Granularity::Day));
        let candidates = items(&[
            "db_2020-01-01T0100",
            "web_2020-01-01T0000",
            "db_2020-01-01T0200",
            "db_2020-01-02T0100",
            "db_2020-01-02T0300",
            "db_undated",
        ]);

        let outcome = rotator.run(candidates);
        assert_eq!(
            names(&outcome.items),
            vec!["db_2020-01-01T0200", "db_2020-01-02T0300", "db_undated"]
        );
        assert_eq!(outcome.stats.candidates, 6);
        assert_eq!(outcome.stats.dated, 5);
        assert_eq!(outcome.stats.matched, 5);
        assert_eq!(outcome.stats.filtered_out, 2);
        assert_eq!(outcome.stats.output, 3);
        assert_eq!(outcome.stats.rejections.get("startswith"), Some(&1));
    }

    #[test]
    fn test_filter_sees_only_matched_items() {
        // The earliest item of the day is rejected by the criteria, so the
        // filter spares the earliest of the remaining two.
        let rotator = rotator(json!({ "except_hour": 1 }), at(2024, 1, 1))
            .with_filter(FilterSpec::ExceptFirst(Granularity::Day));
        let candidates = items(&["a_2020-01-01T01", "a_2020-01-01T02", "a_2020-01-01T03"]);

        assert_eq!(names(&rotator.list_items(candidates)), vec!["a_2020-01-01T03"]);
    }

    #[test]
    fn test_list_items_free_function() {
        let criteria = CriteriaSet::new().with_criterion(Criterion::day([1]).unwrap());
        let filter = FilterSpec::ExceptLast(Granularity::Month);
        let candidates = items(&["a_2020-01-01", "b_2020-02-01", "c_2020-02-02", "d_2020-03-01"]);

        assert!(list_items(candidates.clone(), &criteria, Some(&filter)).is_empty());
        assert_eq!(
            names(&list_items(candidates, &criteria, None)),
            vec!["a_2020-01-01", "b_2020-02-01", "d_2020-03-01"]
        );
    }

    #[test]
    fn test_before_relative_anchor_is_shared_across_batch() {
        let anchor = at(2020, 1, 10);
        let rotator = rotator(json!({ "before": "5d" }), anchor);
        let candidates = items(&["a_2020-01-04", "b_2020-01-05", "c_2020-01-06"]);

        assert_eq!(names(&rotator.list_items(candidates)), vec!["a_2020-01-04"]);
        assert_eq!(
            rotator.criteria().criteria()[0].description(),
            "before(2020-01-05 00:00:00)"
        );
    }
}
