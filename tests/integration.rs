//! Integration tests for HID Timing Stats
//!
//! These tests exercise the public API end to end: capture containers,
//! latency and report-rate statistics, and report generation.

use hid_timing_stats::capture::{CaptureRun, LatencyTrials, ReportRateWindow};
use hid_timing_stats::config::Config;
use hid_timing_stats::input::{DeviceClass, TimedEvent, TimedSample};
use hid_timing_stats::precision::{percentile, round_to, Precision};
use hid_timing_stats::stats::{
    advanced_stats, basic_stats, keyboard_report_rate, pointer_report_rate, BasicStats,
    ReportRateStats, StatsSummary,
};
use hid_timing_stats::SessionReport;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn samples(device: DeviceClass, times_ms: &[f64]) -> Vec<TimedSample> {
    times_ms
        .iter()
        .map(|&ms| TimedSample::now(ms, device))
        .collect()
}

/// Events spaced by `intervals_ms`, starting at `start_ms`
fn events(start_ms: f64, intervals_ms: &[f64]) -> Vec<TimedEvent> {
    let mut t = start_ms;
    let mut out = vec![TimedEvent::at(t)];
    for &interval in intervals_ms {
        t += interval;
        out.push(TimedEvent::with_position(t, t / 10.0, 0.0));
    }
    out
}

/// Small deterministic jitter pattern around `base_ms`
fn jittered(base_ms: f64, count: usize) -> Vec<f64> {
    let pattern = [0.0, 0.05, -0.05, 0.1, -0.1, 0.02, -0.02];
    (0..count)
        .map(|i| base_ms + pattern[i % pattern.len()])
        .collect()
}

// ---------------------------------------------------------------------------
// Latency statistics
// ---------------------------------------------------------------------------

#[test]
fn basic_stats_of_nothing_is_zero() {
    init_logging();
    assert_eq!(
        basic_stats(&[], None),
        BasicStats {
            avg: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0
        }
    );
}

#[test]
fn percentiles_lie_within_extremes() {
    let data = [
        vec![15.0, 3.0, 27.0, 8.0, 8.0, 12.5],
        vec![42.0],
        vec![5.0, 5.0],
        vec![100.0, 1.0, 50.0, 75.0, 20.0, 33.0, 64.0, 2.0, 99.0],
    ];

    for times in data {
        let s = samples(DeviceClass::Keyboard, &times);
        let basic = basic_stats(&s, None);
        let advanced = advanced_stats(&s);

        assert!(basic.min <= advanced.median && advanced.median <= basic.max);
        assert!(basic.min <= advanced.p95 && advanced.p95 <= basic.max);
        assert!(advanced.p95 <= advanced.p99);
    }
}

#[test]
fn percentile_boundaries_match_ends() {
    let sorted = [1.5, 2.0, 8.25, 9.0, 31.0];
    assert_eq!(percentile(&sorted, 0.0), 1.5);
    assert_eq!(percentile(&sorted, 100.0), 31.0);
}

#[test]
fn scores_stay_bounded_on_pathological_input() {
    let cases = [
        vec![0.0, 0.0, 0.0],
        vec![1.0, 1000.0],
        vec![0.001, 0.002, 5000.0, 0.001],
        vec![7.0; 50],
    ];

    for times in cases {
        let stats = advanced_stats(&samples(DeviceClass::Mouse, &times));
        for score in [
            stats.stability,
            stats.consistency,
            stats.performance,
            stats.reliability,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }
}

#[test]
fn latency_outputs_already_rounded() {
    let s = samples(DeviceClass::Mouse, &[10.333, 12.777, 11.111, 13.999, 9.876]);
    let basic = basic_stats(&s, None);
    let advanced = advanced_stats(&s);

    assert_eq!(Precision::Latency.apply(basic.avg), basic.avg);
    for value in [
        advanced.median,
        advanced.p95,
        advanced.p99,
        advanced.standard_deviation,
        advanced.jitter_index,
    ] {
        assert_eq!(Precision::Latency.apply(value), value);
    }
    for value in [
        advanced.stability,
        advanced.consistency,
        advanced.performance,
        advanced.reliability,
        advanced.coefficient_of_variation,
    ] {
        assert_eq!(Precision::Percentage.apply(value), value);
    }
}

#[test]
fn round_to_properties() {
    assert_eq!(round_to(f64::NAN, 2), 0.0);
    assert_eq!(round_to(f64::INFINITY, 2), 0.0);
    let once = round_to(123.456_789, 3);
    assert_eq!(round_to(once, 3), once);
}

// ---------------------------------------------------------------------------
// Report-rate statistics
// ---------------------------------------------------------------------------

#[test]
fn report_rate_degenerate_inputs() {
    init_logging();
    assert_eq!(pointer_report_rate(&[]), ReportRateStats::empty(0));
    assert_eq!(
        keyboard_report_rate(&[TimedEvent::at(3.0)]),
        ReportRateStats::empty(1)
    );
}

#[test]
fn anomalous_gap_does_not_skew_rate() {
    init_logging();
    let mut intervals = vec![8.0; 30];
    intervals.insert(15, 400.0);
    let stats = pointer_report_rate(&events(1000.0, &intervals));

    assert_eq!(stats.effective_report_rate, 125.0);
    assert_eq!(stats.average_interval, 8.0);
    assert_eq!(stats.jitter, 0.0);
    assert_eq!(stats.discarded_intervals, 1);
}

#[test]
fn jittered_1000hz_mouse() {
    let stats = pointer_report_rate(&events(0.0, &jittered(1.0, 500)));

    assert_eq!(stats.total_events, 501);
    assert!((stats.effective_report_rate - 1000.0).abs() < 1.0);
    assert!(stats.jitter > 0.0);
    assert!(stats.signal_quality > 0.0 && stats.signal_quality <= 100.0);
    assert!(stats.max_report_rate >= stats.report_rate);
    assert!(stats.min_report_rate <= stats.report_rate);
}

#[test]
fn report_rate_outputs_already_rounded() {
    let stats = keyboard_report_rate(&events(0.0, &jittered(8.0, 100)));

    for value in [
        stats.report_rate,
        stats.effective_report_rate,
        stats.max_report_rate,
        stats.min_report_rate,
    ] {
        assert_eq!(Precision::Frequency.apply(value), value);
    }
    for value in [
        stats.average_interval,
        stats.jitter,
        stats.interval_variance,
        stats.median_interval,
        stats.p95_interval,
        stats.test_duration,
    ] {
        assert_eq!(Precision::Time.apply(value), value);
    }
    for value in [stats.stability, stats.signal_quality, stats.frequency_stability] {
        assert_eq!(Precision::Percentage.apply(value), value);
    }
}

// ---------------------------------------------------------------------------
// Capture runs
// ---------------------------------------------------------------------------

#[test]
fn full_latency_run_from_config() {
    init_logging();
    let config = Config::default();
    let mut trials = LatencyTrials::from_config(&config.latency);

    for i in 0..25 {
        trials.record(TimedSample::now(10.0 + (i % 3) as f64, DeviceClass::Mouse));
        trials.record(TimedSample::now(15.0 + (i % 2) as f64, DeviceClass::Keyboard));
    }

    assert!(trials.is_complete());
    assert_eq!(trials.count(DeviceClass::Mouse), 20);
    assert_eq!(trials.count(DeviceClass::Keyboard), 20);

    let summary = trials.summary(Some(DeviceClass::Mouse));
    assert!(summary.has_data());
    assert_eq!(summary.basic.min, 10.0);
    assert_eq!(summary.basic.max, 12.0);

    trials.restart(DeviceClass::Keyboard);
    assert!(!trials.is_complete());
    assert_eq!(trials.count(DeviceClass::Mouse), 20);
}

#[test]
fn report_rate_window_from_config() {
    let mut config = Config::default();
    config.report_rate.window_ms = 100;
    let mut window = ReportRateWindow::from_config(&config, DeviceClass::Mouse);

    let mut accepted = 0;
    for i in 0..50 {
        if window.push(TimedEvent::at(500.0 + i as f64 * 4.0)) {
            accepted += 1;
        }
    }

    assert!(window.is_complete());
    assert_eq!(accepted, 25);
    let stats = window.stats();
    assert_eq!(stats.total_events, 25);
    assert_eq!(stats.effective_report_rate, 250.0);
    assert_eq!(stats.test_duration, 96.0);
}

// ---------------------------------------------------------------------------
// Report generation
// ---------------------------------------------------------------------------

#[test]
fn report_generation_produces_valid_json() {
    let mut all = samples(DeviceClass::Mouse, &[9.0, 10.0, 11.0, 10.0]);
    all.extend(samples(DeviceClass::Keyboard, &[14.0, 15.0, 16.0]));

    let pointer = events(0.0, &jittered(1.0, 200));
    let keyboard = events(0.0, &jittered(8.0, 50));

    let report = SessionReport::new(&all, &pointer, &keyboard);
    assert_eq!(report.summary.total_trials, 7);
    assert_eq!(report.summary.total_events, 252);
    assert_eq!(report.latency.comparison.difference_ms, Some(5.0));
    assert!(!report.metadata.generated_at.is_empty());
    assert!(!report.metadata.version.is_empty());

    let json = report.to_json().expect("Failed to serialize report");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["summary"]["total_trials"], 7);
    assert!(parsed["report_rate"]["pointer"]["effective_report_rate"].is_number());
    assert_eq!(parsed["latency"]["mouse"]["device"], "mouse");
}
