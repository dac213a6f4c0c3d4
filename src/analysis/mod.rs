/// Analysis stages run over a cleaned [`Waveform`].
///
/// ```text
///   Waveform ──► statistics ──► power ──► peaks ──► velocity
///                    │            │         │          │
///                    └────────────┴─────────┴──────────┴──► AnalysisReport
/// ```

pub mod peaks;
pub mod power;
pub mod statistics;
pub mod velocity;

use crate::config::Config;
use crate::data::model::Waveform;
use crate::error::AnalysisError;
use crate::report::AnalysisReport;

use peaks::PeakFinder;
use power::PowerReport;
use statistics::VoltageStats;
use velocity::estimate_velocity;

/// Run every stage over `waveform` with the given configuration.
pub fn analyze(waveform: &Waveform, config: &Config) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;

    let voltage = VoltageStats::compute(&waveform.voltage)?;
    let power = PowerReport::compute(&waveform.voltage, &config.rig)?;

    let peaks = PeakFinder::from_params(&config.peaks).find_peaks(waveform);
    log::info!("Detected {} coil pulse peak(s)", peaks.len());
    log::debug!("\n{}", peaks::format_text(&peaks));

    let velocity = estimate_velocity(&peaks, &config.selection, &config.rig);

    Ok(AnalysisReport {
        source: waveform.source.clone(),
        load: waveform.summary,
        voltage,
        power,
        peaks,
        velocity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::velocity::VelocityOutcome;
    use crate::data::model::Sample;

    #[test]
    fn backwards_time_keeps_voltage_and_power() {
        // Four clean pulses on a time axis that runs backwards.
        let waveform = Waveform::from_samples((0..2000usize).map(|i| {
            let voltage = [200usize, 700, 1200, 1700]
                .iter()
                .map(|&c| {
                    let d = i as f64 - c as f64;
                    0.5 * (-(d * d) / 50.0).exp()
                })
                .sum();
            Sample {
                time: -(i as f64) * 1e-4,
                voltage,
            }
        }));

        let report = analyze(&waveform, &Config::default()).unwrap();
        assert_eq!(report.peaks.len(), 4);
        assert!((report.voltage.max - 0.5).abs() < 1e-9);
        assert!(report.power.max_w > 0.0);
        assert!(matches!(
            report.velocity,
            VelocityOutcome::NonPositiveTransit { .. }
        ));
    }
}
