//! Shared utility functions and traits

use std::cmp::Ordering;

/// Extension trait for tracking minimum and maximum values in `Option<T>`.
///
/// Works with partially ordered values such as `f64` millisecond timings.
/// A `NaN` is never stored once a real value is present.
///
/// # Example
///
/// ```
/// use hid_timing_stats::utils::MinMaxExt;
///
/// let mut min: Option<f64> = None;
/// let mut max: Option<f64> = None;
///
/// for ms in [12.0, 9.5, 14.25] {
///     min.update_min(ms);
///     max.update_max(ms);
/// }
/// assert_eq!(min, Some(9.5));
/// assert_eq!(max, Some(14.25));
/// ```
pub trait MinMaxExt<T: PartialOrd + Copy> {
    /// Stores `value` if it is smaller than the current minimum or if no
    /// minimum exists yet.
    fn update_min(&mut self, value: T);

    /// Stores `value` if it is larger than the current maximum or if no
    /// maximum exists yet.
    fn update_max(&mut self, value: T);
}

impl<T: PartialOrd + Copy> MinMaxExt<T> for Option<T> {
    fn update_min(&mut self, value: T) {
        match self {
            Some(current) if value.partial_cmp(current) != Some(Ordering::Less) => {}
            _ => *self = Some(value),
        }
    }

    fn update_max(&mut self, value: T) {
        match self {
            Some(current) if value.partial_cmp(current) != Some(Ordering::Greater) => {}
            _ => *self = Some(value),
        }
    }
}

/// Minimum and maximum of a slice in one pass, `None` when empty.
pub fn extremes<T: PartialOrd + Copy>(values: &[T]) -> Option<(T, T)> {
    let mut min = None;
    let mut max = None;
    for &value in values {
        min.update_min(value);
        max.update_max(value);
    }
    min.zip(max)
}
