// tests/pipeline_test.rs

use std::fmt::Write as _;
use std::path::PathBuf;

use rocket_scope::analysis::velocity::VelocityOutcome;
use rocket_scope::config::PeakSelection;
use rocket_scope::{analyze, load_csv, AnalysisError, Config};

const DT: f64 = 1e-4;

/// Write a scope capture with Gaussian coil pulses centred on the given
/// sample indices. Every 97th reading is "undefined".
fn write_capture(dir: &tempfile::TempDir, pulse_at: &[usize]) -> PathBuf {
    let mut text = String::from("Time (s),Ch1 (V)\n");
    for i in 0..2000usize {
        let v: f64 = pulse_at
            .iter()
            .map(|&c| {
                let d = i as f64 - c as f64;
                0.5 * (-(d * d) / 50.0).exp()
            })
            .sum();
        if i % 97 == 3 {
            writeln!(text, "{:.6},undefined", i as f64 * DT).unwrap();
        } else {
            writeln!(text, "{:.6},{:.6}", i as f64 * DT, v).unwrap();
        }
    }
    let path = dir.path().join("capture.csv");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn four_pulses_give_velocity() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_capture(&dir, &[200, 700, 1200, 1700]);

    let waveform = load_csv(&path).unwrap();
    assert_eq!(waveform.summary.rows_read, 2000);
    assert_eq!(waveform.summary.rows_dropped, 21);
    assert_eq!(waveform.len(), 1979);

    let report = analyze(&waveform, &Config::default()).unwrap();
    assert_eq!(report.peaks.len(), 4);
    assert!((report.voltage.max - 0.5).abs() < 1e-6);
    assert!(report.voltage.min >= 0.0);
    assert!(report.voltage.rms <= report.voltage.max);

    let est = report.velocity.estimate().expect("velocity estimate");
    assert!((est.start_time - 0.02).abs() < 1e-9);
    assert!((est.end_time - 0.17).abs() < 1e-9);
    assert!((est.speed - 0.59 / 0.15).abs() < 1e-6);

    let text = report.to_text();
    assert!(text.contains("Estimated Speed       : 3.93 m/s"));
}

#[test]
fn two_pulses_are_not_enough() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_capture(&dir, &[400, 1400]);

    let report = analyze(&load_csv(&path).unwrap(), &Config::default()).unwrap();
    assert_eq!(
        report.velocity,
        VelocityOutcome::NotEnoughPeaks {
            found: 2,
            required: 4
        }
    );
    assert!(report
        .to_text()
        .contains("Not enough peaks found to estimate velocity."));
}

#[test]
fn selection_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_capture(&dir, &[400, 1400]);

    let config = Config {
        selection: PeakSelection {
            start_peak: 0,
            end_peak: 1,
        },
        ..Config::default()
    };
    let report = analyze(&load_csv(&path).unwrap(), &config).unwrap();
    let est = report.velocity.estimate().unwrap();
    assert!((est.transit_time - 0.1).abs() < 1e-9);
    assert!((est.speed - 5.9).abs() < 1e-6);
}

#[test]
fn tall_distance_threshold_merges_pulses() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_capture(&dir, &[200, 700, 1200, 1700]);

    let mut config = Config::default();
    config.peaks.min_distance = 600;
    let report = analyze(&load_csv(&path).unwrap(), &config).unwrap();
    assert!(report.peaks.len() < 4);
    assert!(matches!(
        report.velocity,
        VelocityOutcome::NotEnoughPeaks { .. }
    ));
}

#[test]
fn all_undefined_capture_fails_clearly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dead.csv");
    std::fs::write(&path, "Time (s),Ch1 (V)\n0.0,undefined\n0.1,undefined\n").unwrap();

    let waveform = load_csv(&path).unwrap();
    assert_eq!(
        analyze(&waveform, &Config::default()).unwrap_err(),
        AnalysisError::EmptyDataset
    );
}
