//! Count-based latency trials

use super::CaptureRun;
use crate::config::LatencyConfig;
use crate::input::{DeviceClass, TimedSample};
use crate::stats::{advanced_stats, basic_stats, AdvancedStats, BasicStats, LatencySummary};
use log::debug;

/// Upper bound on trials preallocated per device
const PREALLOCATED_TRIALS: usize = 256;

/// Latency trials for both devices.
///
/// Samples are kept in arrival order. Each device stops accepting samples
/// once it reaches the target count.
#[derive(Debug, Clone)]
pub struct LatencyTrials {
    /// Responses to collect per device
    target_count: usize,
    /// Completed trials, both devices interleaved
    samples: Vec<TimedSample>,
}

impl LatencyTrials {
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            samples: Vec::with_capacity(target_count.min(PREALLOCATED_TRIALS) * 2),
        }
    }

    pub fn from_config(config: &LatencyConfig) -> Self {
        Self::new(config.trial_count)
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Record a completed trial.
    ///
    /// Returns false when the sample was rejected because its device has
    /// already reached the target count.
    pub fn record(&mut self, sample: TimedSample) -> bool {
        if self.is_device_complete(sample.device) {
            debug!(
                "{} trials already complete, ignoring sample",
                sample.device.name()
            );
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Clear one device's trials, leaving the other device untouched
    pub fn restart(&mut self, device: DeviceClass) {
        self.samples.retain(|s| s.device != device);
    }

    /// All samples in arrival order
    pub fn samples(&self) -> &[TimedSample] {
        &self.samples
    }

    /// One device's samples in arrival order
    pub fn device_samples(&self, device: DeviceClass) -> Vec<TimedSample> {
        self.samples
            .iter()
            .filter(|s| s.device == device)
            .cloned()
            .collect()
    }

    pub fn count(&self, device: DeviceClass) -> usize {
        self.samples.iter().filter(|s| s.device == device).count()
    }

    /// Fraction of the target collected for a device (0.0 to 1.0)
    pub fn progress(&self, device: DeviceClass) -> f64 {
        if self.target_count == 0 {
            return 1.0;
        }
        (self.count(device) as f64 / self.target_count as f64).min(1.0)
    }

    pub fn is_device_complete(&self, device: DeviceClass) -> bool {
        self.count(device) >= self.target_count
    }

    pub fn basic_stats(&self, device: Option<DeviceClass>) -> BasicStats {
        basic_stats(&self.samples, device)
    }

    pub fn advanced_stats(&self, device: DeviceClass) -> AdvancedStats {
        advanced_stats(&self.device_samples(device))
    }

    pub fn summary(&self, device: Option<DeviceClass>) -> LatencySummary {
        LatencySummary::compute(&self.samples, device)
    }
}

impl CaptureRun for LatencyTrials {
    fn name(&self) -> &'static str {
        "Latency Trials"
    }

    fn is_complete(&self) -> bool {
        DeviceClass::all()
            .iter()
            .all(|&device| self.is_device_complete(device))
    }

    fn reset(&mut self) {
        self.samples.clear();
    }
}
