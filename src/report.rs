//! Session report and export functionality

use crate::input::{DeviceClass, TimedEvent, TimedSample};
use crate::stats::{
    keyboard_report_rate, pointer_report_rate, DeviceComparison, LatencySummary,
    ReportRateStats, ResultStatus, StatsSummary, TestResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for report export
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: SessionSummary,
    /// Latency statistics per device and overall
    pub latency: LatencyReport,
    /// Report-rate statistics per device
    pub report_rate: ReportRateReport,
    /// Rendered result rows by category
    pub results: ReportResults,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Library version
    pub version: String,
}

/// Session summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Latency trials recorded across both devices
    pub total_trials: usize,
    /// Report-rate events captured across both devices
    pub total_events: usize,
    /// Headline pointer report rate in Hz
    pub pointer_rate_hz: f64,
    /// Headline keyboard report rate in Hz
    pub keyboard_rate_hz: f64,
    /// Number of rows flagged as warning or error
    pub issues_detected: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyReport {
    pub overall: LatencySummary,
    pub mouse: LatencySummary,
    pub keyboard: LatencySummary,
    pub comparison: DeviceComparison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRateReport {
    pub pointer: ReportRateStats,
    pub keyboard: ReportRateStats,
}

/// All rendered result rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResults {
    pub mouse_latency: Vec<ResultEntry>,
    pub keyboard_latency: Vec<ResultEntry>,
    pub pointer_report_rate: Vec<ResultEntry>,
    pub keyboard_report_rate: Vec<ResultEntry>,
}

/// Single result entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub label: String,
    pub value: String,
    pub status: String,
}

impl From<&TestResult> for ResultEntry {
    fn from(result: &TestResult) -> Self {
        let status = match result.status {
            ResultStatus::Ok => "ok",
            ResultStatus::Warning => "warning",
            ResultStatus::Error => "error",
            ResultStatus::Info => "info",
        };
        Self {
            label: result.label.clone(),
            value: result.value.clone(),
            status: status.to_string(),
        }
    }
}

impl SessionReport {
    /// Build a report from one session's latency trials and report-rate
    /// windows
    pub fn new(
        samples: &[TimedSample],
        pointer_events: &[TimedEvent],
        keyboard_events: &[TimedEvent],
    ) -> Self {
        Self::with_rates(
            samples,
            pointer_report_rate(pointer_events),
            keyboard_report_rate(keyboard_events),
        )
    }

    /// Build a report from already-computed report-rate statistics
    pub fn with_rates(
        samples: &[TimedSample],
        pointer: ReportRateStats,
        keyboard: ReportRateStats,
    ) -> Self {
        let now: DateTime<Utc> = Utc::now();

        let latency = LatencyReport {
            overall: LatencySummary::compute(samples, None),
            mouse: LatencySummary::compute(samples, Some(DeviceClass::Mouse)),
            keyboard: LatencySummary::compute(samples, Some(DeviceClass::Keyboard)),
            comparison: DeviceComparison::compare(samples),
        };

        let mouse_results = latency.mouse.get_results();
        let keyboard_results = latency.keyboard.get_results();
        let pointer_results = pointer.get_results();
        let keyboard_rate_results = keyboard.get_results();

        // Count issues (warnings and errors)
        let count_issues = |results: &[TestResult]| -> u32 {
            results.iter().filter(|r| r.status.is_issue()).count() as u32
        };

        let issues = count_issues(&mouse_results)
            + count_issues(&keyboard_results)
            + count_issues(&pointer_results)
            + count_issues(&keyboard_rate_results);

        let to_entries =
            |results: &[TestResult]| results.iter().map(ResultEntry::from).collect::<Vec<_>>();

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary: SessionSummary {
                total_trials: samples.len(),
                total_events: pointer.total_events + keyboard.total_events,
                pointer_rate_hz: pointer.effective_report_rate,
                keyboard_rate_hz: keyboard.effective_report_rate,
                issues_detected: issues,
            },
            results: ReportResults {
                mouse_latency: to_entries(&mouse_results),
                keyboard_latency: to_entries(&keyboard_results),
                pointer_report_rate: to_entries(&pointer_results),
                keyboard_report_rate: to_entries(&keyboard_rate_results),
            },
            latency,
            report_rate: ReportRateReport { pointer, keyboard },
        }
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_helpers::{events_from_intervals, mixed_samples};

    #[test]
    fn empty_session_report() {
        let report = SessionReport::new(&[], &[], &[]);
        assert_eq!(report.summary.total_trials, 0);
        assert_eq!(report.summary.total_events, 0);
        assert_eq!(report.summary.issues_detected, 0);
        assert_eq!(report.latency.comparison.difference_ms, None);
        assert_eq!(report.report_rate.pointer, ReportRateStats::empty(0));
    }

    #[test]
    fn report_summarizes_session() {
        let samples = mixed_samples(&[8.0, 8.0, 8.0], &[10.0, 12.0, 11.0, 13.0, 10.0, 50.0]);
        let pointer = events_from_intervals(&[8.0; 10]);
        let keyboard = events_from_intervals(&[1.0; 10]);

        let report = SessionReport::new(&samples, &pointer, &keyboard);
        assert_eq!(report.summary.total_trials, 9);
        assert_eq!(report.summary.total_events, 22);
        assert_eq!(report.summary.pointer_rate_hz, 125.0);
        assert_eq!(report.summary.keyboard_rate_hz, 1000.0);
        assert_eq!(report.latency.keyboard.basic.avg, 17.67);
        // Keyboard stability, consistency and reliability score 0
        assert!(report.summary.issues_detected >= 3);
        assert!(!report.results.mouse_latency.is_empty());
    }

    #[test]
    fn report_json_contains_sections() {
        let report = SessionReport::new(&[], &[], &[]);
        let json = report.to_json().expect("serialize");
        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"latency\""));
        assert!(json.contains("\"report_rate\""));
        assert!(json.contains("\"effective_report_rate\""));
        assert!(json.contains("\"mouse_latency\""));
    }

    #[test]
    fn result_entry_status_strings() {
        let entry = ResultEntry::from(&TestResult::warning("Jitter", "2ms"));
        assert_eq!(entry.status, "warning");
        assert_eq!(entry.label, "Jitter");
    }
}
