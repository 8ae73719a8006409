//! The criteria configuration mapping.

use chrono::NaiveDate;
use rl_error::{Result, RlError};
use serde::{Deserialize, Serialize};

use super::DateBound;

/// A single value or a list of values.
///
/// Lets configuration say `day = 1` as well as `day = [1, 15]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value
    One(T),
    /// A list of values
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// Criteria configuration: one optional entry per recognized key.
///
/// Absent keys place no constraint. Unknown keys and operands of the wrong
/// shape are rejected when the mapping is deserialized.
///
/// # Example
///
/// ```
/// use rl_rotator::CriteriaSpec;
///
/// let spec = CriteriaSpec::from_json(serde_json::json!({
///     "before": "5d",
///     "except_day": [1, 15],
/// }))
/// .unwrap();
/// assert_eq!(spec.configured_keys(), vec!["before", "except_day"]);
///
/// assert!(CriteriaSpec::from_json(serde_json::json!({ "befor": "5d" })).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriteriaSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<DateBound>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<DateBound>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_date: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<OneOrMany<NaiveDate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<OneOrMany<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_day: Option<OneOrMany<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<OneOrMany<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_hour: Option<OneOrMany<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<OneOrMany<i32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_year: Option<OneOrMany<i32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startswith: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_startswith: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endswith: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_endswith: Option<OneOrMany<String>>,

    /// Regex searched anywhere in the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl CriteriaSpec {
    /// Create an empty spec (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a plain JSON mapping.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| RlError::config(format!("Invalid criteria: {e}")))
    }

    /// Keys that carry a value, in canonical order.
    pub fn configured_keys(&self) -> Vec<&'static str> {
        let present = [
            ("before", self.before.is_some()),
            ("after", self.after.is_some()),
            ("has_date", self.has_date.is_some()),
            ("date", self.date.is_some()),
            ("day", self.day.is_some()),
            ("except_day", self.except_day.is_some()),
            ("hour", self.hour.is_some()),
            ("except_hour", self.except_hour.is_some()),
            ("year", self.year.is_some()),
            ("except_year", self.except_year.is_some()),
            ("startswith", self.startswith.is_some()),
            ("except_startswith", self.except_startswith.is_some()),
            ("endswith", self.endswith.is_some()),
            ("except_endswith", self.except_endswith.is_some()),
            ("pattern", self.pattern.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(key, set)| set.then_some(key))
            .collect()
    }

    /// Whether no key is configured.
    pub fn is_empty(&self) -> bool {
        self.configured_keys().is_empty()
    }

    /// Overlay `other` on top of `self`: keys set in `other` win.
    pub fn overlay(self, other: CriteriaSpec) -> Self {
        Self {
            before: other.before.or(self.before),
            after: other.after.or(self.after),
            has_date: other.has_date.or(self.has_date),
            date: other.date.or(self.date),
            day: other.day.or(self.day),
            except_day: other.except_day.or(self.except_day),
            hour: other.hour.or(self.hour),
            except_hour: other.except_hour.or(self.except_hour),
            year: other.year.or(self.year),
            except_year: other.except_year.or(self.except_year),
            startswith: other.startswith.or(self.startswith),
            except_startswith: other.except_startswith.or(self.except_startswith),
            endswith: other.endswith.or(self.endswith),
            except_endswith: other.except_endswith.or(self.except_endswith),
            pattern: other.pattern.or(self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use serde_json::json;

    #[test]
    fn test_singleton_and_list_operands() {
        let spec = CriteriaSpec::from_json(json!({ "day": 1, "except_hour": [3, 4] })).unwrap();
        assert_eq!(spec.day, Some(OneOrMany::One(1)));
        assert_eq!(spec.except_hour.unwrap().into_vec(), vec![3, 4]);
    }

    #[test]
    fn test_string_operands() {
        let spec = CriteriaSpec::from_json(json!({
            "startswith": "db_",
            "except_endswith": [".tmp", ".part"],
            "pattern": "^db_\\d+",
        }))
        .unwrap();
        assert_eq!(spec.startswith.unwrap().into_vec(), vec!["db_".to_string()]);
        assert_eq!(spec.except_endswith.unwrap().into_vec().len(), 2);
        assert_eq!(spec.pattern.as_deref(), Some("^db_\\d+"));
    }

    #[test]
    fn test_date_bounds_and_dates() {
        let spec = CriteriaSpec::from_json(json!({
            "before": "5d",
            "after": "2020-01-01",
            "date": ["2020-02-01", "2020-03-01"],
        }))
        .unwrap();
        assert_eq!(spec.before, Some(DateBound::Ago(TimeDelta::days(5))));
        assert!(matches!(spec.after, Some(DateBound::At(_))));
        assert_eq!(spec.date.unwrap().into_vec().len(), 2);
    }

    #[test]
    fn test_unknown_key_fails_fast() {
        let err = CriteriaSpec::from_json(json!({ "before": "5d", "weekday": 1 })).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("weekday"));
    }

    #[test]
    fn test_wrong_operand_shape_fails() {
        assert!(CriteriaSpec::from_json(json!({ "day": "monday" })).is_err());
        assert!(CriteriaSpec::from_json(json!({ "day": [1, "2"] })).is_err());
        assert!(CriteriaSpec::from_json(json!({ "day": -1 })).is_err());
        assert!(CriteriaSpec::from_json(json!({ "has_date": "yes" })).is_err());
        assert!(CriteriaSpec::from_json(json!({ "before": 5 })).is_err());
        assert!(CriteriaSpec::from_json(json!({ "before": "soon" })).is_err());
    }

    #[test]
    fn test_empty_mapping() {
        let spec = CriteriaSpec::from_json(json!({})).unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec, CriteriaSpec::new());
    }

    #[test]
    fn test_overlay_prefers_other() {
        let base = CriteriaSpec::from_json(json!({ "day": 1, "year": 2020 })).unwrap();
        let overrides = CriteriaSpec::from_json(json!({ "day": [2, 3] })).unwrap();
        let merged = base.overlay(overrides);

        assert_eq!(merged.day.unwrap().into_vec(), vec![2, 3]);
        assert_eq!(merged.year.unwrap().into_vec(), vec![2020]);
    }
}
