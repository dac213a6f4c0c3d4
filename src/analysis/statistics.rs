//! Descriptive voltage statistics over the whole capture.

use serde::Serialize;

use crate::error::AnalysisError;

/// Batch statistics of a voltage series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n − 1). `None` for a single sample.
    pub std_dev: Option<f64>,
    /// Population standard deviation (n).
    pub std_dev_population: f64,
    /// `max - min`
    pub peak_to_peak: f64,
    /// `sqrt(mean(v²))`
    pub rms: f64,
}

impl VoltageStats {
    /// Compute statistics for `voltage`. Fails on an empty series instead of
    /// returning NaN.
    pub fn compute(voltage: &[f64]) -> Result<Self, AnalysisError> {
        if voltage.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        let count = voltage.len();
        let n = count as f64;
        let min = voltage.iter().copied().fold(f64::INFINITY, f64::min);
        let max = voltage.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = voltage.iter().sum::<f64>() / n;

        let sum_sq_dev: f64 = voltage.iter().map(|v| (v - mean).powi(2)).sum();
        let std_dev = (count > 1).then(|| (sum_sq_dev / (n - 1.0)).sqrt());
        let std_dev_population = (sum_sq_dev / n).sqrt();

        Ok(Self {
            count,
            min,
            max,
            mean,
            std_dev,
            std_dev_population,
            peak_to_peak: max - min,
            rms: rms(voltage),
        })
    }
}

/// Root-mean-square of a series; 0 for an empty one.
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean_square = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
    mean_square.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn known_values() {
        let stats = VoltageStats::compute(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean - 2.5).abs() < EPS);
        assert!((stats.peak_to_peak - 3.0).abs() < EPS);
        // var_sample = 5/3, var_pop = 5/4
        assert!((stats.std_dev.unwrap() - (5.0f64 / 3.0).sqrt()).abs() < EPS);
        assert!((stats.std_dev_population - 1.25f64.sqrt()).abs() < EPS);
        assert!((stats.rms - 7.5f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn empty_series_fails_clearly() {
        assert_eq!(VoltageStats::compute(&[]), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn single_sample_has_no_sample_std() {
        let stats = VoltageStats::compute(&[-0.3]).unwrap();
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.std_dev_population, 0.0);
        assert_eq!(stats.peak_to_peak, 0.0);
        assert!((stats.rms - 0.3).abs() < EPS);
    }

    #[test]
    fn rms_bounded_by_max_magnitude() {
        let series = [
            vec![0.0, 0.0, 0.0],
            vec![-2.0, 1.0, 0.5],
            vec![0.1, 0.35, -0.05, 0.2, 0.0],
            vec![-5.0],
        ];
        for v in &series {
            let stats = VoltageStats::compute(v).unwrap();
            let max_abs = v.iter().fold(0.0f64, |m, x| m.max(x.abs()));
            assert!(stats.rms >= 0.0);
            assert!(stats.rms <= max_abs + EPS, "{v:?}");
            assert!(stats.peak_to_peak >= 0.0);
        }
    }
}
