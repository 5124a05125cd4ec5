//! Statistics families for latency and report-rate tests

mod latency;
mod report_rate;
pub mod scoring;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use latency::{
    advanced_stats, basic_stats, AdvancedStats, BasicStats, DeviceComparison, LatencySummary,
};
pub use report_rate::{
    filter_intervals, keyboard_report_rate, pointer_report_rate, report_rate_stats,
    FilterProfile, FilteredIntervals, ReportRateStats,
};
pub use scoring::Rating;

use serde::{Deserialize, Serialize};

/// Common trait for every statistics record that can be shown to a user
pub trait StatsSummary {
    /// Name of the statistics family
    fn name(&self) -> &'static str;

    /// Whether the record holds real data rather than the all-zero shape
    fn has_data(&self) -> bool;

    /// Get results as labeled, status-tagged rows
    fn get_results(&self) -> Vec<TestResult>;
}

/// A single result entry
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub label: String,
    pub value: String,
    pub status: ResultStatus,
}

impl TestResult {
    pub fn new(label: impl Into<String>, value: impl Into<String>, status: ResultStatus) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            status,
        }
    }

    pub fn ok(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Ok)
    }

    pub fn warning(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Warning)
    }

    pub fn error(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Error)
    }

    pub fn info(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, ResultStatus::Info)
    }

    /// Row whose status follows the rating of a 0-100 score
    pub fn scored(label: impl Into<String>, value: impl Into<String>, score: f64) -> Self {
        Self::new(label, value, ResultStatus::from(Rating::from_score(score)))
    }
}

/// Status of a test result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Ok,
    Warning,
    Error,
    Info,
}

impl ResultStatus {
    pub fn is_issue(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl From<Rating> for ResultStatus {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Good => Self::Ok,
            Rating::Fair => Self::Warning,
            Rating::Poor => Self::Error,
        }
    }
}

/// Population mean and variance of a slice, `(0, 0)` when empty
pub(crate) fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    (mean, variance)
}

/// Mean absolute difference between adjacent values, 0 for fewer than two
pub(crate) fn mean_adjacent_difference(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let total: f64 = values.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum();
    total / (values.len() - 1) as f64
}
