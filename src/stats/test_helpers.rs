//! Shared test utilities for statistics modules
//!
//! Provides common helper functions for creating samples and event streams.

use crate::input::{DeviceClass, TimedEvent, TimedSample};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed wall-clock origin so samples compare equal across runs
pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Creates one sample per response time, one second apart.
pub fn samples_for(device: DeviceClass, times_ms: &[f64]) -> Vec<TimedSample> {
    times_ms
        .iter()
        .enumerate()
        .map(|(i, &ms)| TimedSample::new(origin() + Duration::seconds(i as i64), ms, device))
        .collect()
}

pub fn mouse_samples(times_ms: &[f64]) -> Vec<TimedSample> {
    samples_for(DeviceClass::Mouse, times_ms)
}

pub fn keyboard_samples(times_ms: &[f64]) -> Vec<TimedSample> {
    samples_for(DeviceClass::Keyboard, times_ms)
}

/// Mouse trials followed by keyboard trials
pub fn mixed_samples(mouse_ms: &[f64], keyboard_ms: &[f64]) -> Vec<TimedSample> {
    let mut samples = mouse_samples(mouse_ms);
    samples.extend(keyboard_samples(keyboard_ms));
    samples
}

/// Events at the given monotonic timestamps
pub fn events_at(timestamps_ms: &[f64]) -> Vec<TimedEvent> {
    timestamps_ms.iter().map(|&t| TimedEvent::at(t)).collect()
}

/// Events whose consecutive intervals are exactly `intervals_ms`, starting at 0
pub fn events_from_intervals(intervals_ms: &[f64]) -> Vec<TimedEvent> {
    let mut t = 0.0;
    let mut events = vec![TimedEvent::at(t)];
    for &interval in intervals_ms {
        t += interval;
        events.push(TimedEvent::at(t));
    }
    events
}

/// `count` events spaced `interval_ms` apart, starting at 0
pub fn uniform_events(count: usize, interval_ms: f64) -> Vec<TimedEvent> {
    (0..count)
        .map(|i| TimedEvent::at(i as f64 * interval_ms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_keep_order_and_device() {
        let samples = keyboard_samples(&[5.0, 6.0]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].device, DeviceClass::Keyboard);
        assert_eq!(samples[1].response_time_ms, 6.0);
        assert!(samples[0].occurred_at < samples[1].occurred_at);
    }

    #[test]
    fn events_from_intervals_accumulate() {
        let events = events_from_intervals(&[8.0, 8.0, 400.0]);
        let times: Vec<f64> = events.iter().map(|e| e.captured_at_ms).collect();
        assert_eq!(times, vec![0.0, 8.0, 16.0, 416.0]);
    }

    #[test]
    fn uniform_events_spacing() {
        let events = uniform_events(3, 1.0);
        assert_eq!(events[2].captured_at_ms, 2.0);
    }
}
