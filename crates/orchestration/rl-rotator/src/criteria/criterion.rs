//! The closed set of per-item criteria.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Timelike};
use regex::Regex;
use rl_error::{Result, RlError};
use rl_types::{ArchiveItem, Timestamp};

/// One per-item predicate.
///
/// Criteria are immutable values validated at construction. Integer sets are
/// range-checked and regexes are compiled once, so evaluation never fails.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// Timestamp resolved and strictly before the cutoff
    Before(Timestamp),

    /// Timestamp resolved and strictly after the cutoff
    After(Timestamp),

    /// Whether resolution succeeded equals the flag
    HasDate(bool),

    /// Calendar date is one of these
    Date(BTreeSet<NaiveDate>),

    /// Day of month is one of these
    Day(BTreeSet<u32>),

    /// Day of month resolved and not one of these
    ExceptDay(BTreeSet<u32>),

    /// Hour is one of these
    Hour(BTreeSet<u32>),

    /// Hour resolved and not one of these
    ExceptHour(BTreeSet<u32>),

    /// Year is one of these
    Year(BTreeSet<i32>),

    /// Year resolved and not one of these
    ExceptYear(BTreeSet<i32>),

    /// Name starts with any of these
    StartsWith(Vec<String>),

    /// Name starts with none of these
    ExceptStartsWith(Vec<String>),

    /// Name ends with any of these
    EndsWith(Vec<String>),

    /// Name ends with none of these
    ExceptEndsWith(Vec<String>),

    /// Regex matches anywhere in the name
    Pattern(Regex),
}

impl Criterion {
    /// `day` criterion. Days must be in `1..=31`.
    pub fn day(days: impl IntoIterator<Item = u32>) -> Result<Self> {
        Ok(Self::Day(int_set("day", days, 1..=31)?))
    }

    /// `except_day` criterion. Days must be in `1..=31`.
    pub fn except_day(days: impl IntoIterator<Item = u32>) -> Result<Self> {
        Ok(Self::ExceptDay(int_set("except_day", days, 1..=31)?))
    }

    /// `hour` criterion. Hours must be in `0..=23`.
    pub fn hour(hours: impl IntoIterator<Item = u32>) -> Result<Self> {
        Ok(Self::Hour(int_set("hour", hours, 0..=23)?))
    }

    /// `except_hour` criterion. Hours must be in `0..=23`.
    pub fn except_hour(hours: impl IntoIterator<Item = u32>) -> Result<Self> {
        Ok(Self::ExceptHour(int_set("except_hour", hours, 0..=23)?))
    }

    /// `year` criterion.
    pub fn year(years: impl IntoIterator<Item = i32>) -> Result<Self> {
        Ok(Self::Year(int_set("year", years, i32::MIN..=i32::MAX)?))
    }

    /// `except_year` criterion.
    pub fn except_year(years: impl IntoIterator<Item = i32>) -> Result<Self> {
        Ok(Self::ExceptYear(int_set(
            "except_year",
            years,
            i32::MIN..=i32::MAX,
        )?))
    }

    /// `date` criterion.
    pub fn date(dates: impl IntoIterator<Item = NaiveDate>) -> Result<Self> {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        if dates.is_empty() {
            return Err(RlError::config("Criterion 'date' needs at least one value"));
        }
        Ok(Self::Date(dates))
    }

    /// `startswith` criterion.
    pub fn starts_with<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Result<Self> {
        Ok(Self::StartsWith(strings("startswith", prefixes)?))
    }

    /// `except_startswith` criterion.
    pub fn except_starts_with<S: Into<String>>(
        prefixes: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        Ok(Self::ExceptStartsWith(strings("except_startswith", prefixes)?))
    }

    /// `endswith` criterion.
    pub fn ends_with<S: Into<String>>(suffixes: impl IntoIterator<Item = S>) -> Result<Self> {
        Ok(Self::EndsWith(strings("endswith", suffixes)?))
    }

    /// `except_endswith` criterion.
    pub fn except_ends_with<S: Into<String>>(
        suffixes: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        Ok(Self::ExceptEndsWith(strings("except_endswith", suffixes)?))
    }

    /// `pattern` criterion. The regex is compiled here, not per item.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| RlError::config(format!("Invalid regex pattern '{pattern}': {e}")))?;
        Ok(Self::Pattern(regex))
    }

    /// Configuration key this criterion answers to.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Before(_) => "before",
            Self::After(_) => "after",
            Self::HasDate(_) => "has_date",
            Self::Date(_) => "date",
            Self::Day(_) => "day",
            Self::ExceptDay(_) => "except_day",
            Self::Hour(_) => "hour",
            Self::ExceptHour(_) => "except_hour",
            Self::Year(_) => "year",
            Self::ExceptYear(_) => "except_year",
            Self::StartsWith(_) => "startswith",
            Self::ExceptStartsWith(_) => "except_startswith",
            Self::EndsWith(_) => "endswith",
            Self::ExceptEndsWith(_) => "except_endswith",
            Self::Pattern(_) => "pattern",
        }
    }

    /// Evaluate against a name and its resolved timestamp.
    pub fn matches(&self, name: &str, timestamp: Option<Timestamp>) -> bool {
        match self {
            Self::Before(cutoff) => timestamp.is_some_and(|ts| ts < *cutoff),
            Self::After(cutoff) => timestamp.is_some_and(|ts| ts > *cutoff),
            Self::HasDate(flag) => timestamp.is_some() == *flag,
            Self::Date(dates) => timestamp.is_some_and(|ts| dates.contains(&ts.date())),
            Self::Day(days) => timestamp.is_some_and(|ts| days.contains(&ts.day())),
            Self::ExceptDay(days) => timestamp.is_some_and(|ts| !days.contains(&ts.day())),
            Self::Hour(hours) => timestamp.is_some_and(|ts| hours.contains(&ts.hour())),
            Self::ExceptHour(hours) => timestamp.is_some_and(|ts| !hours.contains(&ts.hour())),
            Self::Year(years) => timestamp.is_some_and(|ts| years.contains(&ts.year())),
            Self::ExceptYear(years) => timestamp.is_some_and(|ts| !years.contains(&ts.year())),
            Self::StartsWith(prefixes) => prefixes.iter().any(|p| name.starts_with(p.as_str())),
            Self::ExceptStartsWith(prefixes) => {
                !prefixes.iter().any(|p| name.starts_with(p.as_str()))
            }
            Self::EndsWith(suffixes) => suffixes.iter().any(|s| name.ends_with(s.as_str())),
            Self::ExceptEndsWith(suffixes) => !suffixes.iter().any(|s| name.ends_with(s.as_str())),
            Self::Pattern(regex) => regex.is_match(name),
        }
    }

    /// Evaluate against an item.
    pub fn matches_item(&self, item: &ArchiveItem) -> bool {
        self.matches(item.name(), item.timestamp())
    }

    /// Human-readable description, used in logs.
    pub fn description(&self) -> String {
        let operand = match self {
            Self::Before(ts) | Self::After(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::HasDate(flag) => flag.to_string(),
            Self::Date(dates) => {
                let dates: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
                format!("{:?}", dates)
            }
            Self::Day(set) | Self::ExceptDay(set) | Self::Hour(set) | Self::ExceptHour(set) => {
                format!("{:?}", set)
            }
            Self::Year(set) | Self::ExceptYear(set) => format!("{:?}", set),
            Self::StartsWith(v)
            | Self::ExceptStartsWith(v)
            | Self::EndsWith(v)
            | Self::ExceptEndsWith(v) => format!("{:?}", v),
            Self::Pattern(regex) => format!("'{}'", regex.as_str()),
        };
        format!("{}({})", self.key(), operand)
    }
}

fn int_set<T>(
    key: &str,
    values: impl IntoIterator<Item = T>,
    range: std::ops::RangeInclusive<T>,
) -> Result<BTreeSet<T>>
where
    T: Ord + Copy + std::fmt::Display,
{
    let set: BTreeSet<T> = values.into_iter().collect();
    if set.is_empty() {
        return Err(RlError::config(format!(
            "Criterion '{key}' needs at least one value"
        )));
    }
    if let Some(bad) = set.iter().find(|v| !range.contains(*v)) {
        return Err(RlError::config(format!(
            "Criterion '{key}' value {bad} is not in {}..={}",
            range.start(),
            range.end()
        )));
    }
    Ok(set)
}

fn strings<S: Into<String>>(key: &str, values: impl IntoIterator<Item = S>) -> Result<Vec<String>> {
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(RlError::config(format!(
            "Criterion '{key}' needs at least one value"
        )));
    }
    Ok(values)
}
