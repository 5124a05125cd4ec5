//! Numerically stable rounding and interpolated percentiles
//!
//! Every statistic produced by this crate passes through [`round_to`] at
//! one of the [`Precision`] levels before it leaves the engine, and every
//! percentile (median, p95, p99, quartiles) is computed by [`percentile`].

/// Decimal precision used for each kind of quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Time intervals, jitter and variance (0.001ms)
    Time,
    /// Percentages and scores (0.01%)
    Percentage,
    /// Report rates (0.1Hz)
    Frequency,
    /// Response latency (0.01ms)
    Latency,
    /// Test durations shown in seconds (0.1s)
    Duration,
}

impl Precision {
    /// Number of decimal digits kept at this precision
    pub const fn digits(self) -> u32 {
        match self {
            Self::Time => 3,
            Self::Percentage => 2,
            Self::Frequency => 1,
            Self::Latency => 2,
            Self::Duration => 1,
        }
    }

    /// Round a value at this precision
    pub fn apply(self, value: f64) -> f64 {
        round_to(value, self.digits())
    }
}

/// Round half away from zero at `digits` decimal places.
///
/// A machine-epsilon bias is added before scaling so that values such as
/// `1.005` (stored as `1.00499999...`) round the way they read. Non-finite
/// input yields `0.0`.
///
/// # Example
///
/// ```
/// use hid_timing_stats::precision::round_to;
///
/// assert_eq!(round_to(1.005, 2), 1.01);
/// assert_eq!(round_to(17.666_666, 2), 17.67);
/// assert_eq!(round_to(f64::NAN, 2), 0.0);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = (value + f64::EPSILON) * factor;
    if !scaled.is_finite() {
        // Magnitude too large to scale; already integral at this precision
        return value;
    }
    scaled.round() / factor
}

/// Linear-interpolation percentile (R-7) over an ascending slice.
///
/// `p` is expressed in percent and clamped to `[0, 100]`. An empty slice
/// yields `0.0`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };

    let index = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Sorted copy of `values`, leaving the input untouched.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Format a latency in milliseconds, e.g. `"12.35ms"`
pub fn format_latency(ms: f64) -> String {
    format!("{}ms", Precision::Latency.apply(ms))
}

/// Format a frequency in hertz, e.g. `"125Hz"`
pub fn format_frequency(hz: f64) -> String {
    format!("{}Hz", Precision::Frequency.apply(hz))
}

/// Format a percentage or score, e.g. `"87.5%"`
pub fn format_percentage(value: f64) -> String {
    format!("{}%", Precision::Percentage.apply(value))
}

/// Format an interval in milliseconds, e.g. `"7.981ms"`
pub fn format_time(ms: f64) -> String {
    format!("{}ms", Precision::Time.apply(ms))
}

/// Format a duration given in milliseconds as seconds, e.g. `"5s"`
pub fn format_duration(ms: f64) -> String {
    format!("{}s", Precision::Duration.apply(ms / 1000.0))
}
