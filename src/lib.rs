//! HID Timing Stats - latency and report-rate statistics for input devices
//!
//! Turns the timestamped samples collected by a mouse/keyboard test harness
//! into latency metrics (percentiles, dispersion, quality scores) and
//! report-rate metrics (polling frequency, jitter, signal quality). Every
//! computation is a pure, synchronous reduction over an in-memory slice.
//!
//! # Example
//!
//! ```
//! use hid_timing_stats::input::{DeviceClass, TimedEvent, TimedSample};
//! use hid_timing_stats::stats::{advanced_stats, basic_stats, pointer_report_rate};
//!
//! let samples: Vec<TimedSample> = [10.0, 12.0, 11.0, 13.0, 10.0, 50.0]
//!     .iter()
//!     .map(|&ms| TimedSample::now(ms, DeviceClass::Mouse))
//!     .collect();
//! assert_eq!(basic_stats(&samples, Some(DeviceClass::Mouse)).avg, 17.67);
//! assert_eq!(advanced_stats(&samples).median, 11.5);
//!
//! let events: Vec<TimedEvent> = (0..50).map(|i| TimedEvent::at(i as f64 * 8.0)).collect();
//! assert_eq!(pointer_report_rate(&events).effective_report_rate, 125.0);
//! ```

pub mod capture;
pub mod config;
pub mod input;
pub mod precision;
pub mod report;
pub mod stats;
pub mod utils;

pub use config::Config;
pub use report::SessionReport;
