//! CLI argument definitions for rl-rotate.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rl_cli_common::{LogLevel, OutputFormat};
use rl_rotator::Granularity;
use rl_types::ItemKind;

/// List archive items that match date and name criteria, and optionally
/// remove them.
///
/// Matched items are written to stdout; logs and the summary go to stderr.
/// Nothing is deleted unless --remove is given.
///
/// ## Examples
///
/// Backups older than a week, except those from the 1st of the month:
///   rl-rotate -d /var/backups --before 7d --except-day 1
///
/// Keep the last backup of each day, delete the rest:
///   rl-rotate -d /var/backups --except-last day --remove
///
/// Dated table names from another tool:
///   psql -Atc "select tablename from pg_tables" | rl-rotate --startswith events_ --year 2020
#[derive(Parser, Debug)]
#[command(name = "rl-rotate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Source Options ===
    /// Directory to list. Without it, names are read from stdin, one per
    /// line, optionally followed by a tab and fallback metadata.
    #[arg(short, long, env = "RL_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Which files to consider when listing a directory
    #[arg(long, value_enum, default_value = "archive")]
    pub kind: KindArg,

    /// Attach file modification times as fallback date metadata
    #[arg(long)]
    pub mtime_fallback: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long, env = "RL_CONFIG")]
    pub config: Option<PathBuf>,

    // === Criteria Options ===
    /// Items dated strictly before this point (e.g. "5d", "-12h", "2020-01-01")
    #[arg(long)]
    pub before: Option<String>,

    /// Items dated strictly after this point
    #[arg(long)]
    pub after: Option<String>,

    /// Only items with a resolvable date
    #[arg(long, conflicts_with = "no_date")]
    pub has_date: bool,

    /// Only items without a resolvable date
    #[arg(long)]
    pub no_date: bool,

    /// Items dated on one of these calendar days (YYYY-MM-DD)
    #[arg(long, value_delimiter = ',')]
    pub date: Vec<NaiveDate>,

    /// Items dated on these days of the month
    #[arg(long, value_delimiter = ',')]
    pub day: Vec<u32>,

    /// Items dated on any other day of the month
    #[arg(long, value_delimiter = ',')]
    pub except_day: Vec<u32>,

    /// Items dated at these hours
    #[arg(long, value_delimiter = ',')]
    pub hour: Vec<u32>,

    /// Items dated at any other hour
    #[arg(long, value_delimiter = ',')]
    pub except_hour: Vec<u32>,

    /// Items dated in these years
    #[arg(long, value_delimiter = ',')]
    pub year: Vec<i32>,

    /// Items dated in any other year
    #[arg(long, value_delimiter = ',')]
    pub except_year: Vec<i32>,

    /// Names starting with one of these prefixes
    #[arg(long)]
    pub startswith: Vec<String>,

    /// Names starting with none of these prefixes
    #[arg(long)]
    pub except_startswith: Vec<String>,

    /// Names ending with one of these suffixes
    #[arg(long)]
    pub endswith: Vec<String>,

    /// Names ending with none of these suffixes
    #[arg(long)]
    pub except_endswith: Vec<String>,

    /// Names containing a match of this regular expression
    #[arg(long)]
    pub pattern: Option<String>,

    /// Read dates from fallback metadata only, ignoring names
    #[arg(long)]
    pub metadata_only: bool,

    // === Filter Options ===
    /// Spare the earliest matched item of each period
    #[arg(long, value_enum, conflicts_with = "except_last")]
    pub except_first: Option<GranularityArg>,

    /// Spare the latest matched item of each period
    #[arg(long, value_enum)]
    pub except_last: Option<GranularityArg>,

    // === Action Options ===
    /// Remove matched items (requires --directory)
    #[arg(long, requires = "directory")]
    pub remove: bool,

    /// With --remove, report what would be removed without deleting
    #[arg(long, requires = "remove")]
    pub dry_run: bool,

    /// Output format for matched items
    #[arg(long, value_enum, default_value = "plain")]
    pub output_format: OutputFormat,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Item kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Compressed archives (.gz, .bz2, .zip, .tgz)
    Archive,
    /// Log files (.log)
    Log,
    /// Any file whose name carries a date
    Dated,
    /// Every regular file
    Any,
}

impl From<KindArg> for ItemKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Archive => ItemKind::Archive,
            KindArg::Log => ItemKind::Log,
            KindArg::Dated => ItemKind::Dated,
            KindArg::Any => ItemKind::Any,
        }
    }
}

/// Filter granularity argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    /// Calendar day
    Day,
    /// Calendar month
    Month,
    /// Calendar year
    Year,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Day => Granularity::Day,
            GranularityArg::Month => Granularity::Month,
            GranularityArg::Year => Granularity::Year,
        }
    }
}
