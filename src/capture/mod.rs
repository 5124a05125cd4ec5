//! In-memory containers for one test run's samples
//!
//! These hold what the capture harness collects between a start and a
//! restart. They never read a clock: every timestamp comes from the caller.

mod trials;
mod window;

pub use trials::LatencyTrials;
pub use window::ReportRateWindow;

/// Common trait for every capture run
pub trait CaptureRun {
    /// Name of the run
    fn name(&self) -> &'static str;

    /// Check if the run has collected everything it needs
    fn is_complete(&self) -> bool;

    /// Discard everything collected so far
    fn reset(&mut self);
}
