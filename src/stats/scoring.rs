//! Mappings from raw statistical quantities to 0-100 quality scores
//!
//! Threshold tables live in [`ScoreCurve`] constants so they can be tuned
//! without touching the statistics that feed them. Every function here
//! clamps its result to `[0, 100]`.

use serde::{Deserialize, Serialize};

/// Piecewise-linear score curve.
///
/// `knots` are `(input, score)` pairs in ascending input order. Inputs at
/// or below the first knot score the first knot's value, inputs between
/// knots are interpolated, and inputs past the last knot decay by
/// `tail_slope` points per unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCurve {
    pub knots: &'static [(f64, f64)],
    pub tail_slope: f64,
}

impl ScoreCurve {
    /// Evaluate the curve at `x`, clamped to `[0, 100]`
    pub fn score(&self, x: f64) -> f64 {
        let Some(&(first_x, first_score)) = self.knots.first() else {
            return 0.0;
        };
        if x.is_nan() {
            return 0.0;
        }
        if x <= first_x {
            return clamp_score(first_score);
        }

        for pair in self.knots.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let slope = (y1 - y0) / (x1 - x0);
                return clamp_score(y0 + (x - x0) * slope);
            }
        }

        let (last_x, last_score) = self.knots[self.knots.len() - 1];
        clamp_score(last_score - (x - last_x) * self.tail_slope)
    }
}

/// Stability from the coefficient of variation (percent)
pub const STABILITY_CURVE: ScoreCurve = ScoreCurve {
    knots: &[(5.0, 100.0), (10.0, 80.0), (20.0, 50.0), (40.0, 20.0)],
    tail_slope: 0.5,
};

/// Consistency from the standard-deviation-to-mean ratio (percent)
pub const CONSISTENCY_CURVE: ScoreCurve = ScoreCurve {
    knots: &[(3.0, 100.0), (8.0, 70.0), (15.0, 42.0), (30.0, 12.0)],
    tail_slope: 0.4,
};

/// Performance from mean latency in milliseconds
pub const PERFORMANCE_CURVE: ScoreCurve = ScoreCurve {
    knots: &[
        (5.0, 100.0),
        (10.0, 80.0),
        (20.0, 50.0),
        (40.0, 20.0),
        (80.0, 10.0),
    ],
    tail_slope: 0.1,
};

/// Weight of stability in the reliability blend; consistency gets the rest
pub const RELIABILITY_STABILITY_WEIGHT: f64 = 0.6;

/// Signal-quality component weights: interval consistency, peak control,
/// median/mean distribution
pub const SIGNAL_QUALITY_WEIGHTS: (f64, f64, f64) = (0.5, 0.3, 0.2);

/// Clamp a score to `[0, 100]`, mapping `NaN` to zero
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

pub fn stability_score(coefficient_of_variation: f64) -> f64 {
    STABILITY_CURVE.score(coefficient_of_variation)
}

pub fn consistency_score(consistency_ratio: f64) -> f64 {
    CONSISTENCY_CURVE.score(consistency_ratio)
}

pub fn performance_score(mean_latency_ms: f64) -> f64 {
    PERFORMANCE_CURVE.score(mean_latency_ms)
}

pub fn reliability_score(stability: f64, consistency: f64) -> f64 {
    clamp_score(
        stability * RELIABILITY_STABILITY_WEIGHT
            + consistency * (1.0 - RELIABILITY_STABILITY_WEIGHT),
    )
}

/// Report-rate stability: `100 - CV`, clamped
pub fn cv_stability(coefficient_of_variation: f64) -> f64 {
    clamp_score(100.0 - coefficient_of_variation)
}

/// Inputs to the composite signal-quality score, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalQualityInputs {
    /// Mean absolute difference between adjacent intervals
    pub mean_adjacent_difference: f64,
    /// Largest absolute difference between adjacent intervals
    pub max_adjacent_difference: f64,
    pub mean_interval: f64,
    pub median_interval: f64,
}

/// Composite signal quality.
///
/// Blends how steady adjacent intervals are relative to the mean, how
/// large the worst adjacent jump is, and how far the median sits from the
/// mean. Each component is clamped before blending.
pub fn signal_quality(inputs: &SignalQualityInputs) -> f64 {
    let mean = inputs.mean_interval;
    if mean.is_nan() || mean <= 0.0 {
        return 0.0;
    }

    let consistency = clamp_score(100.0 - (inputs.mean_adjacent_difference / mean) * 200.0);
    let peak_control = clamp_score(100.0 - (inputs.max_adjacent_difference / mean) * 100.0);
    let distribution =
        clamp_score(100.0 - ((inputs.median_interval - mean).abs() / mean) * 100.0);

    let (w_consistency, w_peak, w_distribution) = SIGNAL_QUALITY_WEIGHTS;
    clamp_score(consistency * w_consistency + peak_control * w_peak + distribution * w_distribution)
}

/// Coarse rating bucket for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}
