//! `before` / `after` operands.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta};
use rl_error::{Result, RlError};
use rl_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A date bound: either a fixed point in time or a duration before "now".
///
/// Relative bounds are turned into absolute cutoffs exactly once, when a
/// [`CriteriaSet`](super::CriteriaSet) is built, so every item in a pass is
/// compared against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateBound {
    /// This long before the evaluation anchor
    Ago(TimeDelta),

    /// A fixed local wall-clock time
    At(Timestamp),
}

impl DateBound {
    /// Parse a bound.
    ///
    /// Supported formats:
    /// - Relative: `5d`, `-5d`, `12h`, `30m`, `2w`, `90s` (time before now)
    /// - Date only: `2024-01-15` (midnight)
    /// - Date and time: `2024-01-15T10:30:00`, `2024-01-15 10:30`
    /// - RFC 3339: `2024-01-15T10:30:00Z` (converted to local time)
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RlError::config("Empty date bound"));
        }

        if let Some(delta) = parse_relative(input)? {
            return Ok(Self::Ago(delta));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::At(dt.with_timezone(&Local).naive_local()));
        }

        for format in [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(Self::At(dt));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Self::At(date.and_time(chrono::NaiveTime::MIN)));
        }

        Err(RlError::config(format!(
            "Invalid date bound: {input}. Expected a date (2024-01-15), a date and time \
             (2024-01-15T10:30:00), RFC 3339, or a relative duration (5d, 12h, 2w)"
        )))
    }

    /// Turn the bound into an absolute cutoff relative to `anchor`.
    pub fn resolve(&self, anchor: Timestamp) -> Result<Timestamp> {
        match self {
            Self::At(at) => Ok(*at),
            Self::Ago(delta) => anchor.checked_sub_signed(*delta).ok_or_else(|| {
                RlError::config(format!("Relative date bound {self} is out of range"))
            }),
        }
    }
}

/// Parse `[-]<n><unit>`. `Ok(None)` means the input is not relative at all.
fn parse_relative(input: &str) -> Result<Option<TimeDelta>> {
    let body = input.strip_prefix('-').unwrap_or(input);
    let Some(unit) = body.chars().last().filter(|c| c.is_ascii_alphabetic()) else {
        return Ok(None);
    };
    let digits = &body[..body.len() - 1];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }

    let num: i64 = digits
        .parse()
        .map_err(|_| RlError::config(format!("Invalid number in relative date: {digits}")))?;

    let delta = match unit.to_ascii_lowercase() {
        's' => TimeDelta::try_seconds(num),
        'm' => TimeDelta::try_minutes(num),
        'h' => TimeDelta::try_hours(num),
        'd' => TimeDelta::try_days(num),
        'w' => TimeDelta::try_weeks(num),
        _ => {
            return Err(RlError::config(format!(
                "Invalid relative date unit: {input}. Use 's', 'm', 'h', 'd' or 'w'"
            )));
        }
    };

    delta
        .map(Some)
        .ok_or_else(|| RlError::config(format!("Relative date out of range: {input}")))
}

impl std::fmt::Display for DateBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::At(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S")),
            Self::Ago(delta) => {
                let secs = delta.num_seconds();
                if secs % 86_400 == 0 {
                    write!(f, "{}d", secs / 86_400)
                } else if secs % 3_600 == 0 {
                    write!(f, "{}h", secs / 3_600)
                } else if secs % 60 == 0 {
                    write!(f, "{}m", secs / 60)
                } else {
                    write!(f, "{secs}s")
                }
            }
        }
    }
}

impl TryFrom<String> for DateBound {
    type Error = RlError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DateBound> for String {
    fn from(bound: DateBound) -> Self {
        bound.to_string()
    }
}

impl From<TimeDelta> for DateBound {
    fn from(delta: TimeDelta) -> Self {
        Self::Ago(delta)
    }
}

impl From<Timestamp> for DateBound {
    fn from(at: Timestamp) -> Self {
        Self::At(at)
    }
}
