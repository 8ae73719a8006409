//! The engine with in-memory collaborators: dated table names, snapshots
//! described by free text.

use crate::common::{CollectingRemover, names};
use chrono::NaiveDate;
use rl_rotator::{CriteriaSet, CriteriaSpec, FilterSpec, Granularity, Rotator, list_items};
use rl_traits::{ItemRemover, ItemSource, StaticSource};
use rl_types::ArchiveItem;
use serde_json::json;

#[tokio::test]
async fn test_dated_tables_by_year_except_first_day() {
    let source = StaticSource::from_names([
        "events_20190101",
        "events_20200101",
        "events_20200102",
        "events_20200201",
        "events_20200202",
        "users",
    ]);
    let spec = CriteriaSpec::from_json(json!({ "year": 2020, "except_day": 1 })).unwrap();
    let criteria = CriteriaSet::from_spec(&spec).unwrap();

    let rotate = list_items(source.list().await.unwrap(), &criteria, None);
    assert_eq!(names(&rotate), vec!["events_20200102", "events_20200202"]);

    let remover = CollectingRemover::new();
    remover.remove(&rotate).await.unwrap();
    assert_eq!(remover.removed(), vec!["events_20200102", "events_20200202"]);
}

#[tokio::test]
async fn test_snapshots_dated_by_description() {
    let source = StaticSource::new(vec![
        ArchiveItem::new("snap-0a1").with_raw_metadata("Created by backup job on 2020-03-01T02:00:00"),
        ArchiveItem::new("snap-0a2").with_raw_metadata("Created by backup job on 2020-03-01T14:00:00"),
        ArchiveItem::new("snap-0a3").with_raw_metadata("Created by backup job on 2020-03-02T02:00:00"),
        ArchiveItem::new("snap-0a4").with_raw_metadata("manual"),
    ]);

    let criteria = CriteriaSet::from_spec(&CriteriaSpec::from_json(json!({ "has_date": true })).unwrap())
        .unwrap();
    let rotate = list_items(
        source.list().await.unwrap(),
        &criteria,
        Some(&FilterSpec::ExceptLast(Granularity::Day)),
    );

    assert_eq!(names(&rotate), vec!["snap-0a1"]);
}

#[tokio::test]
async fn test_supplied_timestamps_are_trusted() {
    let at = |d: u32| {
        NaiveDate::from_ymd_opt(2020, 5, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    };
    // Names carry misleading dates; the collaborator already knows better.
    let source = StaticSource::new(vec![
        ArchiveItem::new("obj_2000-01-01").with_timestamp(at(1)),
        ArchiveItem::new("obj_2000-01-02").with_timestamp(at(2)),
    ]);

    let spec = CriteriaSpec::from_json(json!({ "date": "2020-05-02" })).unwrap();
    let rotator = Rotator::new(CriteriaSet::from_spec(&spec).unwrap());

    assert_eq!(names(&rotator.list_items(source.list().await.unwrap())), vec!["obj_2000-01-02"]);
}

#[tokio::test]
async fn test_repeated_except_first_converges_to_empty() {
    let mut items: Vec<ArchiveItem> = ["a_2020-01-01T01", "a_2020-01-01T02", "a_2020-01-02T01"]
        .into_iter()
        .map(ArchiveItem::new)
        .collect();
    let filter = FilterSpec::ExceptFirst(Granularity::Day);
    let criteria = CriteriaSet::new();

    let mut rounds = 0;
    while !items.is_empty() {
        items = list_items(items, &criteria, Some(&filter));
        rounds += 1;
        assert!(rounds <= 3);
    }
    assert_eq!(rounds, 2);
}

#[tokio::test]
async fn test_invalid_criteria_fail_before_listing() {
    assert!(CriteriaSpec::from_json(json!({ "weekday": 1 })).is_err());

    let spec = CriteriaSpec::from_json(json!({ "hour": 24 })).unwrap();
    let err = CriteriaSet::from_spec(&spec).unwrap_err();
    assert!(err.is_config());
}
