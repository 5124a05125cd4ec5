//! Click and key response latency statistics

use super::scoring::{
    consistency_score, performance_score, reliability_score, stability_score, Rating,
};
use super::{mean_adjacent_difference, mean_and_variance, StatsSummary, TestResult};
use crate::input::{DeviceClass, TimedSample};
use crate::precision::{
    format_latency, format_percentage, percentile, sorted_copy, Precision,
};
use crate::utils::MinMaxExt;
use serde::{Deserialize, Serialize};

/// Average, extremes and count of response times
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicStats {
    /// Mean response time, rounded at latency precision
    pub avg: f64,
    /// Fastest response, unrounded
    pub min: f64,
    /// Slowest response, unrounded
    pub max: f64,
    pub count: usize,
}

impl BasicStats {
    /// Spread between slowest and fastest response
    pub fn range(&self) -> f64 {
        Precision::Latency.apply(self.max - self.min)
    }
}

/// Dispersion, percentiles and quality scores of response times
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvancedStats {
    pub stability: f64,
    pub consistency: f64,
    pub performance: f64,
    pub reliability: f64,
    pub median: f64,
    pub p95: f64,
    pub p99: f64,
    pub standard_deviation: f64,
    /// Standard deviation relative to the mean, in percent
    pub coefficient_of_variation: f64,
    /// Mean absolute change between consecutive trials
    pub jitter_index: f64,
}

/// Compute basic statistics, optionally restricted to one device.
///
/// An empty (filtered) set yields the all-zero record.
pub fn basic_stats(samples: &[TimedSample], device: Option<DeviceClass>) -> BasicStats {
    let mut min = None;
    let mut max = None;
    let mut sum = 0.0;
    let mut count = 0usize;

    for sample in samples
        .iter()
        .filter(|s| device.map_or(true, |d| s.device == d))
    {
        let ms = sample.response_time_ms;
        min.update_min(ms);
        max.update_max(ms);
        sum += ms;
        count += 1;
    }

    match min.zip(max) {
        Some((min, max)) if count > 0 => BasicStats {
            avg: Precision::Latency.apply(sum / count as f64),
            min,
            max,
            count,
        },
        _ => BasicStats::default(),
    }
}

/// Compute advanced statistics over every sample passed in.
///
/// Callers filter by device beforehand if they need to. Samples are taken
/// in arrival order for the jitter index and in sorted order for the
/// percentiles.
pub fn advanced_stats(samples: &[TimedSample]) -> AdvancedStats {
    if samples.is_empty() {
        return AdvancedStats::default();
    }

    let times: Vec<f64> = samples.iter().map(|s| s.response_time_ms).collect();
    let sorted = sorted_copy(&times);

    let (mean, variance) = mean_and_variance(&times);
    let std_dev = variance.sqrt();
    let coefficient_of_variation = if mean > 0.0 { std_dev / mean * 100.0 } else { 0.0 };
    // Same quantity as the CV; scored against a stricter curve
    let consistency_ratio = coefficient_of_variation;

    let stability = stability_score(coefficient_of_variation);
    let consistency = consistency_score(consistency_ratio);
    let performance = performance_score(mean);
    let reliability = reliability_score(stability, consistency);

    AdvancedStats {
        stability: Precision::Percentage.apply(stability),
        consistency: Precision::Percentage.apply(consistency),
        performance: Precision::Percentage.apply(performance),
        reliability: Precision::Percentage.apply(reliability),
        median: Precision::Latency.apply(percentile(&sorted, 50.0)),
        p95: Precision::Latency.apply(percentile(&sorted, 95.0)),
        p99: Precision::Latency.apply(percentile(&sorted, 99.0)),
        standard_deviation: Precision::Latency.apply(std_dev),
        coefficient_of_variation: Precision::Percentage.apply(coefficient_of_variation),
        jitter_index: Precision::Latency.apply(mean_adjacent_difference(&times)),
    }
}

/// Basic and advanced statistics for one device, or for all samples
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Device the summary is restricted to, `None` for every device
    pub device: Option<DeviceClass>,
    pub basic: BasicStats,
    pub advanced: AdvancedStats,
}

impl LatencySummary {
    pub fn compute(samples: &[TimedSample], device: Option<DeviceClass>) -> Self {
        let advanced = match device {
            Some(d) => {
                let filtered: Vec<TimedSample> =
                    samples.iter().filter(|s| s.device == d).cloned().collect();
                advanced_stats(&filtered)
            }
            None => advanced_stats(samples),
        };

        Self {
            device,
            basic: basic_stats(samples, device),
            advanced,
        }
    }

    /// Overall rating, driven by the performance score
    pub fn rating(&self) -> Rating {
        Rating::from_score(self.advanced.performance)
    }
}

impl StatsSummary for LatencySummary {
    fn name(&self) -> &'static str {
        match self.device {
            Some(DeviceClass::Mouse) => "Mouse Latency",
            Some(DeviceClass::Keyboard) => "Keyboard Latency",
            None => "Overall Latency",
        }
    }

    fn has_data(&self) -> bool {
        self.basic.count > 0
    }

    fn get_results(&self) -> Vec<TestResult> {
        let mut results = Vec::new();

        results.push(TestResult::info("Samples", format!("{}", self.basic.count)));

        if !self.has_data() {
            return results;
        }

        let basic = &self.basic;
        let advanced = &self.advanced;

        results.push(TestResult::scored(
            "Avg Latency",
            format_latency(basic.avg),
            advanced.performance,
        ));
        results.push(TestResult::info("Min Latency", format_latency(basic.min)));
        results.push(TestResult::info("Max Latency", format_latency(basic.max)));
        results.push(TestResult::info("Range", format_latency(basic.range())));
        results.push(TestResult::info("Median", format_latency(advanced.median)));
        results.push(TestResult::info("P95", format_latency(advanced.p95)));
        results.push(TestResult::info("P99", format_latency(advanced.p99)));
        results.push(TestResult::info(
            "Std Dev",
            format_latency(advanced.standard_deviation),
        ));
        results.push(TestResult::info(
            "Variation",
            format_percentage(advanced.coefficient_of_variation),
        ));
        results.push(TestResult::info(
            "Jitter Index",
            format_latency(advanced.jitter_index),
        ));

        for (label, score) in [
            ("Stability", advanced.stability),
            ("Consistency", advanced.consistency),
            ("Performance", advanced.performance),
            ("Reliability", advanced.reliability),
        ] {
            results.push(TestResult::scored(label, format_percentage(score), score));
        }

        results.push(TestResult::info("Rating", self.rating().label()));

        results
    }
}

/// Side-by-side latency of mouse and keyboard trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceComparison {
    pub mouse: BasicStats,
    pub keyboard: BasicStats,
    /// Absolute difference of the averages, `None` unless both have data
    pub difference_ms: Option<f64>,
}

impl DeviceComparison {
    pub fn compare(samples: &[TimedSample]) -> Self {
        let mouse = basic_stats(samples, Some(DeviceClass::Mouse));
        let keyboard = basic_stats(samples, Some(DeviceClass::Keyboard));
        let difference_ms = (mouse.count > 0 && keyboard.count > 0)
            .then(|| Precision::Latency.apply((mouse.avg - keyboard.avg).abs()));

        Self {
            mouse,
            keyboard,
            difference_ms,
        }
    }

    /// Device with the lower average latency, `None` on a tie or missing data
    pub fn faster_device(&self) -> Option<DeviceClass> {
        match self.difference_ms {
            Some(diff) if diff > 0.0 => {
                if self.mouse.avg < self.keyboard.avg {
                    Some(DeviceClass::Mouse)
                } else {
                    Some(DeviceClass::Keyboard)
                }
            }
            _ => None,
        }
    }
}
