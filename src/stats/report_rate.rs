//! Report-rate (polling frequency) statistics
//!
//! Pointer motion and key signals share one algorithm. The only thing that
//! differs between them is the [`FilterProfile`] that bounds which
//! intervals count as plausible polling gaps.

use super::scoring::{cv_stability, signal_quality, SignalQualityInputs};
use super::{mean_adjacent_difference, mean_and_variance, StatsSummary, TestResult};
use crate::input::{raw_intervals, DeviceClass, TimedEvent};
use crate::precision::{
    format_duration, format_frequency, format_percentage, format_time, percentile, sorted_copy,
    Precision,
};
use crate::utils::extremes;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Fence multiplier applied to the interquartile range
const IQR_FENCE: f64 = 1.5;

/// Minimum number of intervals the IQR filter must keep
const MIN_RETAINED_INTERVALS: f64 = 3.0;

/// Device-specific bounds on plausible event intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterProfile {
    /// Shortest interval accepted, in milliseconds
    pub min_interval_ms: f64,
    /// Longest interval accepted, in milliseconds
    pub max_interval_ms: f64,
    /// Share of intervals the IQR filter must keep before falling back to
    /// the absolute bounds
    pub min_retained_fraction: f64,
}

impl FilterProfile {
    /// Continuous pointer motion (up to 10kHz, gaps up to 500ms)
    pub const POINTER: Self = Self {
        min_interval_ms: 0.1,
        max_interval_ms: 500.0,
        min_retained_fraction: 0.5,
    };

    /// Discrete key signals (up to 8kHz keyboards, key-repeat gaps up to 1s)
    pub const KEYBOARD: Self = Self {
        min_interval_ms: 0.125,
        max_interval_ms: 1000.0,
        min_retained_fraction: 0.3,
    };

    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Mouse => Self::POINTER,
            DeviceClass::Keyboard => Self::KEYBOARD,
        }
    }

    fn within_bounds(&self, interval: f64) -> bool {
        interval >= self.min_interval_ms && interval <= self.max_interval_ms
    }
}

impl Default for FilterProfile {
    fn default() -> Self {
        Self::POINTER
    }
}

/// Intervals kept after outlier filtering, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredIntervals {
    pub retained: Vec<f64>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// True when the IQR fence kept too few intervals and the profile's
    /// absolute bounds were used instead
    pub used_fallback: bool,
}

/// Drop outliers from strictly positive intervals.
///
/// The IQR fence is intersected with the profile bounds. If it keeps fewer
/// than `max(3, fraction * n)` intervals, the profile bounds alone are used.
pub fn filter_intervals(intervals: &[f64], profile: &FilterProfile) -> FilteredIntervals {
    let sorted = sorted_copy(intervals);
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;

    let lower_bound = (q1 - IQR_FENCE * iqr).max(profile.min_interval_ms);
    let upper_bound = (q3 + IQR_FENCE * iqr).min(profile.max_interval_ms);
    trace!(
        "IQR filter: q1={:.3} q3={:.3} bounds=[{:.3}, {:.3}]",
        q1,
        q3,
        lower_bound,
        upper_bound
    );

    let fenced: Vec<f64> = intervals
        .iter()
        .copied()
        .filter(|&i| i >= lower_bound && i <= upper_bound)
        .collect();

    let required =
        (intervals.len() as f64 * profile.min_retained_fraction).max(MIN_RETAINED_INTERVALS);
    if fenced.len() as f64 >= required {
        return FilteredIntervals {
            retained: fenced,
            lower_bound,
            upper_bound,
            used_fallback: false,
        };
    }

    debug!(
        "IQR filter kept {} of {} intervals, falling back to absolute bounds",
        fenced.len(),
        intervals.len()
    );
    FilteredIntervals {
        retained: intervals
            .iter()
            .copied()
            .filter(|&i| profile.within_bounds(i))
            .collect(),
        lower_bound: profile.min_interval_ms,
        upper_bound: profile.max_interval_ms,
        used_fallback: true,
    }
}

/// Polling-frequency metrics for one sampling window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportRateStats {
    /// Mean interval between kept events (ms)
    pub average_interval: f64,
    /// `1000 / average_interval` (Hz)
    pub report_rate: f64,
    /// Rate implied by the shortest kept interval (Hz)
    pub max_report_rate: f64,
    /// Rate implied by the longest kept interval (Hz)
    pub min_report_rate: f64,
    /// Standard deviation of kept intervals (ms)
    pub jitter: f64,
    /// `100 - CV`, clamped to 0-100
    pub stability: f64,
    /// Number of raw events handed in
    pub total_events: usize,
    /// Last minus first raw event timestamp (ms)
    pub test_duration: f64,
    /// `1000 / median_interval` (Hz), the headline figure
    pub effective_report_rate: f64,
    /// Composite score of interval regularity
    #[serde(alias = "temporal_precision")]
    pub signal_quality: f64,
    pub frequency_stability: f64,
    /// Population variance of kept intervals (ms²)
    pub interval_variance: f64,
    pub median_interval: f64,
    pub p95_interval: f64,
    /// Raw intervals dropped as non-positive or outliers
    pub discarded_intervals: usize,
}

impl ReportRateStats {
    /// The all-zero record for a window with no usable intervals
    pub fn empty(total_events: usize) -> Self {
        Self {
            total_events,
            ..Self::default()
        }
    }
}

/// Compute report-rate statistics for events captured with `profile`.
///
/// Fewer than two events, or no strictly increasing timestamps, yield the
/// all-zero record with `total_events` set.
pub fn report_rate_stats(events: &[TimedEvent], profile: &FilterProfile) -> ReportRateStats {
    let total_events = events.len();
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return ReportRateStats::empty(total_events);
    };
    if total_events < 2 {
        return ReportRateStats::empty(total_events);
    }

    let raw = raw_intervals(events);
    let intervals: Vec<f64> = raw.iter().copied().filter(|&i| i > 0.0).collect();
    if intervals.len() < raw.len() {
        debug!(
            "Discarded {} non-positive intervals out of {}",
            raw.len() - intervals.len(),
            raw.len()
        );
    }
    if intervals.is_empty() {
        return ReportRateStats {
            discarded_intervals: raw.len(),
            ..ReportRateStats::empty(total_events)
        };
    }

    let filtered = filter_intervals(&intervals, profile);
    let valid = filtered.retained;
    let discarded_intervals = raw.len() - valid.len();
    let test_duration = Precision::Time.apply((last.captured_at_ms - first.captured_at_ms).max(0.0));

    let Some((min_interval, max_interval)) = extremes(&valid) else {
        return ReportRateStats {
            test_duration,
            discarded_intervals,
            ..ReportRateStats::empty(total_events)
        };
    };

    let (average_interval, variance) = mean_and_variance(&valid);
    let jitter = variance.sqrt();
    let sorted = sorted_copy(&valid);
    let median_interval = percentile(&sorted, 50.0);
    let p95_interval = percentile(&sorted, 95.0);

    let coefficient_of_variation = if average_interval > 0.0 {
        jitter / average_interval * 100.0
    } else {
        0.0
    };
    let stability = cv_stability(coefficient_of_variation);

    let signal_quality = if valid.len() > 2 {
        let max_adjacent_difference = valid
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .fold(0.0, f64::max);
        signal_quality(&SignalQualityInputs {
            mean_adjacent_difference: mean_adjacent_difference(&valid),
            max_adjacent_difference,
            mean_interval: average_interval,
            median_interval,
        })
    } else {
        0.0
    };

    let rate = |interval: f64| Precision::Frequency.apply(1000.0 / interval);

    ReportRateStats {
        average_interval: Precision::Time.apply(average_interval),
        report_rate: rate(average_interval),
        max_report_rate: rate(min_interval),
        min_report_rate: rate(max_interval),
        jitter: Precision::Time.apply(jitter),
        stability: Precision::Percentage.apply(stability),
        total_events,
        test_duration,
        effective_report_rate: rate(median_interval),
        signal_quality: Precision::Percentage.apply(signal_quality),
        frequency_stability: Precision::Percentage.apply(signal_quality),
        interval_variance: Precision::Time.apply(variance),
        median_interval: Precision::Time.apply(median_interval),
        p95_interval: Precision::Time.apply(p95_interval),
        discarded_intervals,
    }
}

/// Report-rate statistics for pointer-motion events
pub fn pointer_report_rate(events: &[TimedEvent]) -> ReportRateStats {
    report_rate_stats(events, &FilterProfile::POINTER)
}

/// Report-rate statistics for key-signal events
pub fn keyboard_report_rate(events: &[TimedEvent]) -> ReportRateStats {
    report_rate_stats(events, &FilterProfile::KEYBOARD)
}

impl StatsSummary for ReportRateStats {
    fn name(&self) -> &'static str {
        "Report Rate"
    }

    fn has_data(&self) -> bool {
        self.average_interval > 0.0
    }

    fn get_results(&self) -> Vec<TestResult> {
        let mut results = Vec::new();

        results.push(TestResult::info(
            "Events Recorded",
            format!("{}", self.total_events),
        ));

        if !self.has_data() {
            return results;
        }

        results.push(TestResult::info(
            "Effective Rate",
            format_frequency(self.effective_report_rate),
        ));
        results.push(TestResult::info(
            "Average Rate",
            format_frequency(self.report_rate),
        ));
        results.push(TestResult::info(
            "Max Rate",
            format_frequency(self.max_report_rate),
        ));
        results.push(TestResult::info(
            "Min Rate",
            format_frequency(self.min_report_rate),
        ));
        results.push(TestResult::info(
            "Avg Interval",
            format_time(self.average_interval),
        ));
        results.push(TestResult::info(
            "Median Interval",
            format_time(self.median_interval),
        ));
        results.push(TestResult::info(
            "P95 Interval",
            format_time(self.p95_interval),
        ));
        results.push(TestResult::info("Jitter", format_time(self.jitter)));
        results.push(TestResult::scored(
            "Stability",
            format_percentage(self.stability),
            self.stability,
        ));
        results.push(TestResult::scored(
            "Signal Quality",
            format_percentage(self.signal_quality),
            self.signal_quality,
        ));
        results.push(TestResult::info(
            "Duration",
            format_duration(self.test_duration),
        ));

        if self.discarded_intervals > 0 {
            results.push(TestResult::info(
                "Discarded",
                format!("{}", self.discarded_intervals),
            ));
        }

        results
    }
}
