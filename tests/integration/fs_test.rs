//! Directory listing, rotation and removal end to end.

use crate::common::{directory_with, names, remaining};
use chrono::{Datelike, Duration, Local};
use rl_rotator::{RotationConfig, Rotator};
use rl_source_fs::{FsRemover, FsSource};
use rl_traits::{ItemRemover, ItemSource};
use rl_types::ItemKind;

fn config(toml: &str) -> RotationConfig {
    RotationConfig::from_toml_str(toml).unwrap()
}

#[tokio::test]
async fn test_keep_last_backup_per_day() {
    let dir = directory_with(&[
        "db_2020-01-01_0100.sql.gz",
        "db_2020-01-01_1300.sql.gz",
        "db_2020-01-01_2300.sql.gz",
        "db_2020-01-02_0100.sql.gz",
        "README.txt",
    ]);

    let rotator = Rotator::from_config(&config(
        r#"
        [criteria]
        startswith = "db_"

        [filter]
        except_last = "day"
        "#,
    ))
    .unwrap();

    let candidates = FsSource::new(dir.path()).list().await.unwrap();
    let outcome = rotator.run(candidates);
    assert_eq!(
        names(&outcome.items),
        vec!["db_2020-01-01_0100.sql.gz", "db_2020-01-01_1300.sql.gz"]
    );

    let report = FsRemover::new(dir.path())
        .remove(&outcome.items)
        .await
        .unwrap();
    assert!(!report.has_failures());
    assert_eq!(
        remaining(dir.path()),
        vec![
            "README.txt",
            "db_2020-01-01_2300.sql.gz",
            "db_2020-01-02_0100.sql.gz"
        ]
    );
}

#[tokio::test]
async fn test_older_than_week_except_first_of_month() {
    let today = Local::now().date_naive();
    let old = today - Duration::days(30);
    let first_of_month = old.with_day0(0).unwrap_or(old);
    let recent = today - Duration::days(1);

    let old_name = format!("app_{}.log", old.format("%Y-%m-%d"));
    let first_name = format!("app_{}.log", first_of_month.format("%Y-%m-%d"));
    let recent_name = format!("app_{}.log", recent.format("%Y-%m-%d"));
    let dir = directory_with(&[&old_name, &first_name, &recent_name, "app.log"]);

    let rotator = Rotator::from_config(&config(
        r#"
        [criteria]
        before = "7d"
        except_day = 1
        "#,
    ))
    .unwrap();

    let source = FsSource::new(dir.path()).with_kind(ItemKind::Log);
    let rotate = rotator.list_items(source.list().await.unwrap());

    if old == first_of_month {
        assert!(rotate.is_empty());
    } else {
        assert_eq!(names(&rotate), vec![old_name.as_str()]);
    }
}

#[tokio::test]
async fn test_dry_run_leaves_directory_untouched() {
    let files = ["a_20200101.tgz", "a_20200102.tgz", "a_20210101.tgz"];
    let dir = directory_with(&files);

    let rotator = Rotator::from_config(&config("[criteria]\nyear = 2020\n")).unwrap();
    let rotate = rotator.list_items(FsSource::new(dir.path()).list().await.unwrap());

    let report = FsRemover::new(dir.path())
        .with_dry_run(true)
        .remove(&rotate)
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.removed, vec!["a_20200101.tgz", "a_20200102.tgz"]);
    assert_eq!(remaining(dir.path()), files.to_vec());
}

#[tokio::test]
async fn test_mtime_fallback_dates_undated_files() {
    let dir = directory_with(&["nightly.gz", "weekly.gz"]);
    let this_year = Local::now().format("%Y").to_string();

    let rotator = Rotator::from_config(&config(&format!(
        "[criteria]\nyear = {this_year}\n"
    )))
    .unwrap();

    let without = FsSource::new(dir.path());
    assert!(rotator.list_items(without.list().await.unwrap()).is_empty());

    let with = FsSource::new(dir.path()).with_mtime_fallback(true);
    assert_eq!(rotator.list_items(with.list().await.unwrap()).len(), 2);
}

#[tokio::test]
async fn test_removal_failure_is_reported_per_item() {
    let dir = directory_with(&["a_2020-01-01.gz", "b_2020-01-01.gz"]);

    let rotator = Rotator::default();
    let rotate = rotator.list_items(FsSource::new(dir.path()).list().await.unwrap());
    std::fs::remove_file(dir.path().join("a_2020-01-01.gz")).unwrap();

    let report = FsRemover::new(dir.path()).remove(&rotate).await.unwrap();
    assert_eq!(report.removed, vec!["b_2020-01-01.gz"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "a_2020-01-01.gz");
}
