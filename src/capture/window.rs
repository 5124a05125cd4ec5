//! Duration-based report-rate sampling window

use super::CaptureRun;
use crate::config::Config;
use crate::input::{DeviceClass, TimedEvent};
use crate::stats::{report_rate_stats, FilterProfile, ReportRateStats};
use log::debug;

/// Events captured during one fixed-length sampling window.
///
/// The window opens at the first event's timestamp. The first event at or
/// past `start + window_ms` closes it; that event and everything after it
/// is dropped until the window is reset.
#[derive(Debug, Clone)]
pub struct ReportRateWindow {
    device: DeviceClass,
    profile: FilterProfile,
    /// Window length in milliseconds
    window_ms: f64,
    events: Vec<TimedEvent>,
    frozen: bool,
}

impl ReportRateWindow {
    pub fn new(device: DeviceClass, profile: FilterProfile, window_ms: f64) -> Self {
        Self {
            device,
            profile,
            window_ms,
            events: Vec::with_capacity(10000),
            frozen: false,
        }
    }

    /// Window using the default profile for the device
    pub fn for_device(device: DeviceClass, window_ms: f64) -> Self {
        Self::new(device, FilterProfile::for_device(device), window_ms)
    }

    /// Window with the configured length and device profile
    pub fn from_config(config: &Config, device: DeviceClass) -> Self {
        Self::new(
            device,
            config.profile_for(device),
            config.window().as_secs_f64() * 1000.0,
        )
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Timestamp of the first captured event
    pub fn start_ms(&self) -> Option<f64> {
        self.events.first().map(|e| e.captured_at_ms)
    }

    /// Add an event. Returns false if the window is already closed.
    pub fn push(&mut self, event: TimedEvent) -> bool {
        if self.frozen {
            return false;
        }

        if let Some(start) = self.start_ms() {
            if event.captured_at_ms - start >= self.window_ms {
                debug!(
                    "{} window closed after {} events",
                    self.device.name(),
                    self.events.len()
                );
                self.frozen = true;
                return false;
            }
        }

        self.events.push(event);
        true
    }

    /// Close the window early
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Fraction of the window elapsed (0.0 to 1.0)
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.frozen {
            return 1.0;
        }
        if self.window_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.window_ms).clamp(0.0, 1.0)
    }

    /// Statistics over the events captured so far
    pub fn stats(&self) -> ReportRateStats {
        report_rate_stats(&self.events, &self.profile)
    }
}

impl CaptureRun for ReportRateWindow {
    fn name(&self) -> &'static str {
        match self.device {
            DeviceClass::Mouse => "Pointer Report Rate",
            DeviceClass::Keyboard => "Keyboard Report Rate",
        }
    }

    fn is_complete(&self) -> bool {
        self.frozen
    }

    fn reset(&mut self) {
        self.events.clear();
        self.frozen = false;
    }
}
