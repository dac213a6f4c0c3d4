//! Power delivered into the load resistor.
//!
//! The coil output is rectified and dropped across the load through a
//! divider, so each reading is scaled by the divider ratio before `V²/R`.

use serde::Serialize;

use crate::config::RigConfig;
use crate::error::AnalysisError;

use super::statistics::rms;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerReport {
    /// Mean instantaneous power (W).
    pub average_w: f64,
    /// Largest instantaneous power (W).
    pub max_w: f64,
    pub peak_to_peak_v: f64,
    pub rms_v: f64,
}

/// `D · V² / R` for a single reading.
pub fn instantaneous_power(voltage: f64, rig: &RigConfig) -> f64 {
    rig.divider_ratio * voltage * voltage / rig.load_resistance_ohms
}

/// Instantaneous power for every reading.
pub fn power_series(voltage: &[f64], rig: &RigConfig) -> Vec<f64> {
    voltage
        .iter()
        .map(|&v| instantaneous_power(v, rig))
        .collect()
}

impl PowerReport {
    pub fn compute(voltage: &[f64], rig: &RigConfig) -> Result<Self, AnalysisError> {
        if voltage.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        let power = power_series(voltage, rig);
        let average_w = power.iter().sum::<f64>() / power.len() as f64;
        let max_w = power.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let v_min = voltage.iter().copied().fold(f64::INFINITY, f64::min);
        let v_max = voltage.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            average_w,
            max_w,
            peak_to_peak_v: v_max - v_min,
            rms_v: rms(voltage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn default_rig_scaling() {
        let rig = RigConfig::default();
        // 21 * 1² / 1.1
        assert!((instantaneous_power(1.0, &rig) - 21.0 / 1.1).abs() < EPS);
        assert!((instantaneous_power(-1.0, &rig) - 21.0 / 1.1).abs() < EPS);
        assert_eq!(instantaneous_power(0.0, &rig), 0.0);
    }

    #[test]
    fn report_reductions() {
        let rig = RigConfig {
            load_resistance_ohms: 2.0,
            divider_ratio: 4.0,
            ..RigConfig::default()
        };
        let report = PowerReport::compute(&[0.0, 1.0, -2.0], &rig).unwrap();
        // power = [0, 2, 8]
        assert!((report.average_w - 10.0 / 3.0).abs() < EPS);
        assert!((report.max_w - 8.0).abs() < EPS);
        assert!((report.peak_to_peak_v - 3.0).abs() < EPS);
        assert!((report.rms_v - (5.0f64 / 3.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn monotonic_in_magnitude() {
        let rig = RigConfig::default();
        let mut last = 0.0;
        for i in 0..200 {
            let v = i as f64 * 0.05;
            let p_pos = instantaneous_power(v, &rig);
            let p_neg = instantaneous_power(-v, &rig);
            assert!(p_pos >= last);
            assert_eq!(p_pos, p_neg);
            last = p_pos;
        }
    }

    #[test]
    fn empty_is_an_error() {
        assert_eq!(
            PowerReport::compute(&[], &RigConfig::default()),
            Err(AnalysisError::EmptyDataset)
        );
    }
}
