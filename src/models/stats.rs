// file: src/models/stats.rs
// description: coverage statistics for a prefix-query evaluation run
// reference: IEEE 754 round-half-to-even

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total_queries: usize,
    pub successful_searches: usize,
    pub coverage_percentage: f64,
}

impl CoverageStats {
    /// Coverage is `100 * successful / total` rounded to one decimal place.
    /// An empty query set has zero coverage.
    pub fn new(total_queries: usize, successful_searches: usize) -> Self {
        Self {
            total_queries,
            successful_searches,
            coverage_percentage: Self::coverage(total_queries, successful_searches),
        }
    }

    /// Rounds the exact binary value to one decimal, ties to even. Scaling by
    /// ten first would move or create ties.
    fn coverage(total: usize, successful: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let raw = successful as f64 / total as f64 * 100.0;
        format!("{:.1}", raw).parse().unwrap_or(raw)
    }
}

impl Default for CoverageStats {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
