//! Timed samples and raw events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Class of input device under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Pointer device (clicks, movement)
    Mouse,
    /// Keyboard (key presses, key repeat)
    Keyboard,
}

impl DeviceClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mouse => "Mouse",
            Self::Keyboard => "Keyboard",
        }
    }

    pub fn all() -> &'static [DeviceClass] {
        &[Self::Mouse, Self::Keyboard]
    }
}

/// One completed latency trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSample {
    /// Wall-clock time the trial completed (display only)
    pub occurred_at: DateTime<Utc>,
    /// Stimulus-to-response time measured on a monotonic clock
    pub response_time_ms: f64,
    /// Device the trial was run with
    pub device: DeviceClass,
}

impl TimedSample {
    pub fn new(occurred_at: DateTime<Utc>, response_time_ms: f64, device: DeviceClass) -> Self {
        Self {
            occurred_at,
            response_time_ms,
            device,
        }
    }

    /// Sample stamped with the current wall-clock time
    pub fn now(response_time_ms: f64, device: DeviceClass) -> Self {
        Self::new(Utc::now(), response_time_ms, device)
    }
}

/// Pointer position carried along for charting
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One raw input event captured during a report-rate window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Monotonic timestamp in milliseconds
    pub captured_at_ms: f64,
    /// Pointer position, if the event carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl TimedEvent {
    /// Event without a spatial payload (key signals)
    pub fn at(captured_at_ms: f64) -> Self {
        Self {
            captured_at_ms,
            position: None,
        }
    }

    /// Pointer-motion event with its position
    pub fn with_position(captured_at_ms: f64, x: f64, y: f64) -> Self {
        Self {
            captured_at_ms,
            position: Some(Position { x, y }),
        }
    }
}

/// Intervals between chronologically consecutive events, in milliseconds.
///
/// Non-positive intervals are included; filtering is up to the caller.
pub fn raw_intervals(events: &[TimedEvent]) -> Vec<f64> {
    events
        .windows(2)
        .map(|pair| pair[1].captured_at_ms - pair[0].captured_at_ms)
        .collect()
}
