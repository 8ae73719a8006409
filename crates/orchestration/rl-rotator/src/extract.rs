//! Date extraction from item names and fallback metadata.
//!
//! Names are scanned with an ordered chain of patterns. The first pattern that
//! yields a calendar-valid date wins:
//!
//! 1. `YYYY-MM-DD`, optionally followed by a time. A trailing zone offset such
//!    as `-0500` is ignored.
//! 2. `YYYYMMDD`, optionally followed by `HHMM[SS]`.
//! 3. `YYYY MM DD` with any mix of `-`, `_`, `.` between the groups, and the
//!    same optional time.
//! 4. `YYMMDD`, with or without `-`, `_`, `.` separators.
//!
//! A time directly after the date is one of:
//!
//! - `T12`, `T1230`, `T12:30:45` (ISO)
//! - `_1230`, `_123045`, `_12:30:45`
//! - ` 12:30[:45]`, `.12:30[:45]` (colons required)
//! - `-12-30[-45]` (dashes between every group)
//!
//! Any other digits after the date are not a time: `_0001` is read as 00:01,
//! but `-0001` and `.0001` leave the time at midnight.
//!
//! Within one pattern every start offset is tried left to right, so a digit run
//! that is not a valid date (`12345678`) does not hide a later one.

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use rl_types::Timestamp;
use serde::{Deserialize, Serialize};

const TIME: &str = concat!(
    r"(?:T(?P<th>\d{2})(?::?(?P<tm>\d{2})(?::?(?P<ts>\d{2}))?)?",
    r"|_(?P<uh>\d{2}):?(?P<um>\d{2})(?::?(?P<us>\d{2}))?",
    r"|[ .](?P<ch>\d{2}):(?P<cm>\d{2})(?::(?P<cs>\d{2}))?",
    r"|-(?P<dh>\d{2})-(?P<dm>\d{2})(?:-(?P<ds>\d{2}))?)?",
);

/// Capture group names of each time form: hour, minute, second.
const TIME_GROUPS: [(&str, &str, &str); 5] = [
    ("th", "tm", "ts"),
    ("uh", "um", "us"),
    ("ch", "cm", "cs"),
    ("dh", "dm", "ds"),
    ("sh", "sm", "ss"),
];

/// Where dates are looked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// Scan the name, then the fallback metadata
    #[default]
    NameThenMetadata,

    /// Ignore the name and only scan the metadata (e.g. a snapshot start time)
    MetadataOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearDigits {
    Four,
    Two,
}

#[derive(Debug, Clone)]
struct DatePattern {
    name: &'static str,
    regex: Regex,
    year: YearDigits,
}

impl DatePattern {
    fn new(name: &'static str, pattern: &str, year: YearDigits) -> Self {
        let regex = Regex::new(pattern).expect("date patterns are static and valid");
        Self { name, regex, year }
    }

    /// First calendar-valid match in `text`.
    fn scan(&self, text: &str) -> Option<Timestamp> {
        let mut start = 0;
        while start < text.len() {
            let caps = self.regex.captures_at(text, start)?;
            let found = caps.get(0)?;
            if let Some(timestamp) = self.build(&caps) {
                return Some(timestamp);
            }
            // Matches always begin on an ASCII digit.
            start = found.start() + 1;
        }
        None
    }

    fn build(&self, caps: &Captures<'_>) -> Option<Timestamp> {
        let raw_year: i32 = number(caps, "y")?;
        let year = match self.year {
            YearDigits::Four => raw_year,
            YearDigits::Two if raw_year < 70 => 2000 + raw_year,
            YearDigits::Two => 1900 + raw_year,
        };
        let date = NaiveDate::from_ymd_opt(year, number(caps, "m")?, number(caps, "d")?)?;

        let time = time_of_day(caps).unwrap_or(NaiveTime::MIN);
        Some(date.and_time(time))
    }
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: &str) -> Option<T> {
    caps.name(group)?.as_str().parse().ok()
}

/// Time captured next to the date. Invalid times fall back to midnight.
fn time_of_day(caps: &Captures<'_>) -> Option<NaiveTime> {
    let (hour, minute, second) = TIME_GROUPS
        .into_iter()
        .find(|(hour, _, _)| caps.name(hour).is_some())?;
    NaiveTime::from_hms_opt(
        number(caps, hour)?,
        number(caps, minute).unwrap_or(0),
        number(caps, second).unwrap_or(0),
    )
}

/// Extracts timestamps from item names using an ordered heuristic chain.
///
/// # Example
///
/// ```
/// use rl_rotator::DateExtractor;
///
/// let extractor = DateExtractor::new();
/// let ts = extractor.extract("backup_2020-01-02.tar", None).unwrap();
/// assert_eq!(ts.to_string(), "2020-01-02 00:00:00");
///
/// // No date in the name: fall back to metadata
/// let ts = extractor.extract("snap-0a1b2c", Some("2021-03-04T05:06:07.000Z")).unwrap();
/// assert_eq!(ts.to_string(), "2021-03-04 05:06:07");
///
/// assert!(extractor.extract("latest.tar", None).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DateExtractor {
    patterns: Vec<DatePattern>,
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DateExtractor {
    /// Create an extractor with the standard pattern chain.
    pub fn new() -> Self {
        let patterns = vec![
            DatePattern::new(
                "yyyy-mm-dd",
                &format!(r"(?P<y>\d{{4}})-(?P<m>\d{{2}})-(?P<d>\d{{2}}){TIME}"),
                YearDigits::Four,
            ),
            DatePattern::new(
                "yyyymmdd",
                r"(?P<y>\d{4})(?P<m>\d{2})(?P<d>\d{2})(?:[T_\-]?(?P<sh>\d{2})(?P<sm>\d{2})(?P<ss>\d{2})?)?",
                YearDigits::Four,
            ),
            DatePattern::new(
                "yyyy_mm_dd",
                &format!(r"(?P<y>\d{{4}})[\-_.](?P<m>\d{{2}})[\-_.](?P<d>\d{{2}}){TIME}"),
                YearDigits::Four,
            ),
            DatePattern::new(
                "yy-mm-dd",
                r"(?P<y>\d{2})[\-_.]?(?P<m>\d{2})[\-_.]?(?P<d>\d{2})",
                YearDigits::Two,
            ),
        ];
        Self { patterns }
    }

    /// Extract a timestamp from `name`, falling back to `fallback`.
    ///
    /// Returns `None` when neither contains a date. That is not an error.
    pub fn extract(&self, name: &str, fallback: Option<&str>) -> Option<Timestamp> {
        self.extract_from(DateSource::NameThenMetadata, name, fallback)
    }

    /// Extract a timestamp honoring a [`DateSource`] policy.
    pub fn extract_from(
        &self,
        source: DateSource,
        name: &str,
        fallback: Option<&str>,
    ) -> Option<Timestamp> {
        match source {
            DateSource::NameThenMetadata => self
                .scan(name)
                .or_else(|| fallback.and_then(|meta| self.scan(meta))),
            DateSource::MetadataOnly => fallback.and_then(|meta| self.scan(meta)),
        }
    }

    /// Whether `name` itself carries a date.
    pub fn has_date(&self, name: &str) -> bool {
        self.scan(name).is_some()
    }

    /// Names of the patterns in priority order.
    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }

    fn scan(&self, text: &str) -> Option<Timestamp> {
        self.patterns.iter().find_map(|p| p.scan(text))
    }
}
