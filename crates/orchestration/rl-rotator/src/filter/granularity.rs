//! Bucket granularity for set filters.

use chrono::Datelike;
use rl_error::RlError;
use rl_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A timestamp truncated to a granularity: `(year, month, day)` with the
/// finer fields zeroed.
pub type Bucket = (i32, u32, u32);

/// How coarsely items are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar day
    Day,
    /// Calendar month
    Month,
    /// Calendar year
    Year,
}

impl Granularity {
    /// Truncate a timestamp to this granularity.
    pub fn bucket(&self, ts: Timestamp) -> Bucket {
        match self {
            Self::Day => (ts.year(), ts.month(), ts.day()),
            Self::Month => (ts.year(), ts.month(), 0),
            Self::Year => (ts.year(), 0, 0),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = RlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(RlError::config(format!(
                "Invalid granularity '{other}'. Expected 'day', 'month' or 'year'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_truncation() {
        let ts: Timestamp = "2020-03-15T12:00:00".parse().unwrap();
        assert_eq!(Granularity::Day.bucket(ts), (2020, 3, 15));
        assert_eq!(Granularity::Month.bucket(ts), (2020, 3, 0));
        assert_eq!(Granularity::Year.bucket(ts), (2020, 0, 0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!(" month ".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("week".parse::<Granularity>().is_err());
    }
}
