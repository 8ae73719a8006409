//! Statistics for rotation passes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters collected during one `list_items` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationStats {
    /// Candidates handed to the engine
    pub candidates: usize,

    /// Candidates with a resolved timestamp after extraction
    pub dated: usize,

    /// Candidates accepted by every criterion
    pub matched: usize,

    /// Matched items removed from the result by the set filter
    pub filtered_out: usize,

    /// Items in the final result
    pub output: usize,

    /// Rejections per criterion key (first rejecting criterion only)
    pub rejections: BTreeMap<String, usize>,
}

impl RotationStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a candidate.
    pub fn record_candidate(&mut self, dated: bool) {
        self.candidates += 1;
        if dated {
            self.dated += 1;
        }
    }

    /// Record a rejection by the criterion with `key`.
    pub fn record_rejection(&mut self, key: &str) {
        *self.rejections.entry(key.to_string()).or_default() += 1;
    }

    /// Record the result sizes before and after the set filter.
    pub fn record_result(&mut self, matched: usize, output: usize) {
        self.matched = matched;
        self.output = output;
        self.filtered_out = matched.saturating_sub(output);
    }

    /// Candidates without a resolved timestamp.
    pub fn undated(&self) -> usize {
        self.candidates - self.dated
    }

    /// Total rejections across criteria.
    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counters() {
        let mut stats = RotationStats::new();
        stats.record_candidate(true);
        stats.record_candidate(false);
        stats.record_candidate(true);
        stats.record_rejection("year");
        stats.record_rejection("year");
        stats.record_result(1, 0);

        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.dated, 2);
        assert_eq!(stats.undated(), 1);
        assert_eq!(stats.rejected(), 2);
        assert_eq!(stats.rejections.get("year"), Some(&2));
        assert_eq!(stats.filtered_out, 1);
    }
}
