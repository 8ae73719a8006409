//! Main execution logic for rl-rotate CLI.

use std::io::BufRead;
use std::path::Path;

use anyhow::Result;
use rl_error::RlError;
use rl_rotator::{
    CriteriaSpec, DateBound, DateSource, FilterSpec, OneOrMany, RotationConfig, RotationStats,
    Rotator,
};
use rl_source_fs::{FsRemover, FsSource};
use rl_traits::{ItemRemover, ItemSource, RemovalReport, StaticSource};
use rl_types::ArchiveItem;
use tracing::info;

use crate::args::Cli;

/// What a run did, for the summary on stderr.
#[derive(Debug)]
pub struct RunSummary {
    /// Where candidates came from
    pub source: String,

    /// Engine counters
    pub stats: RotationStats,

    /// Removal outcome, when --remove was given
    pub report: Option<RemovalReport>,
}

impl RunSummary {
    /// Whether some matched items could not be removed.
    pub fn has_failures(&self) -> bool {
        self.report.as_ref().is_some_and(|r| r.has_failures())
    }
}

/// Execute a rotation with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    let config = build_config(&args)?;
    let rotator = Rotator::from_config(&config)?;

    let source: Box<dyn ItemSource> = match &args.directory {
        Some(dir) => Box::new(
            FsSource::new(dir)
                .with_kind(args.kind.into())
                .with_mtime_fallback(args.mtime_fallback),
        ),
        None => Box::new(StaticSource::new(read_items(std::io::stdin().lock())?)),
    };

    info!(
        source = %source.description(),
        criteria = %rotator.criteria().description(),
        "Starting rotation"
    );

    let candidates = source.list().await?;
    let outcome = rotator.run(candidates);

    rl_cli_common::write_items(&mut std::io::stdout().lock(), &outcome.items, args.output_format)?;

    let report = match (&args.directory, args.remove) {
        (Some(dir), true) => {
            let remover = FsRemover::new(dir).with_dry_run(args.dry_run);
            Some(remover.remove(&outcome.items).await?)
        }
        _ => None,
    };

    Ok(RunSummary {
        source: source.description(),
        stats: outcome.stats,
        report,
    })
}

/// Build the rotation configuration: the config file, if any, with flags
/// layered on top.
pub fn build_config(args: &Cli) -> Result<RotationConfig, RlError> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => RotationConfig::new(),
    };

    let criteria = base.criteria.overlay(criteria_from_args(args)?);

    let filter = match (args.except_first, args.except_last) {
        (Some(g), _) => Some(FilterSpec::ExceptFirst(g.into())),
        (None, Some(g)) => Some(FilterSpec::ExceptLast(g.into())),
        (None, None) => base.filter,
    };

    let date_source = if args.metadata_only {
        DateSource::MetadataOnly
    } else {
        base.date_source
    };

    Ok(RotationConfig {
        criteria,
        filter,
        date_source,
    })
}

fn load_config(path: &Path) -> Result<RotationConfig, RlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RlError::config(format!("Failed to read config '{}': {e}", path.display()))
    })?;
    RotationConfig::from_toml_str(&contents)
}

fn criteria_from_args(args: &Cli) -> Result<CriteriaSpec, RlError> {
    let has_date = match (args.has_date, args.no_date) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    };

    Ok(CriteriaSpec {
        before: args.before.as_deref().map(DateBound::parse).transpose()?,
        after: args.after.as_deref().map(DateBound::parse).transpose()?,
        has_date,
        date: many(&args.date),
        day: many(&args.day),
        except_day: many(&args.except_day),
        hour: many(&args.hour),
        except_hour: many(&args.except_hour),
        year: many(&args.year),
        except_year: many(&args.except_year),
        startswith: many(&args.startswith),
        except_startswith: many(&args.except_startswith),
        endswith: many(&args.endswith),
        except_endswith: many(&args.except_endswith),
        pattern: args.pattern.clone(),
    })
}

/// An unset list flag leaves the key absent.
fn many<T: Clone>(values: &[T]) -> Option<OneOrMany<T>> {
    (!values.is_empty()).then(|| OneOrMany::Many(values.to_vec()))
}

/// Read candidates, one per line: a name, optionally followed by a tab and
/// fallback metadata. Blank lines are skipped.
pub fn read_items<R: BufRead>(reader: R) -> Result<Vec<ArchiveItem>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let item = match line.split_once('\t') {
            Some((name, meta)) => ArchiveItem::new(name.trim()).with_raw_metadata(meta.trim()),
            None => ArchiveItem::new(line.trim()),
        };
        items.push(item);
    }
    Ok(items)
}
