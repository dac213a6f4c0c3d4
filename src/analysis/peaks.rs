//! Coil Pulse Peak Detection
//!
//! Local-maxima filtering over the voltage trace. A maximum survives when it
//! is tall enough, far enough from any taller accepted peak, and prominent
//! enough relative to the valleys around it.

use serde::Serialize;

use crate::config::PeakParams;
use crate::data::model::Waveform;

/// A detected pulse peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Sample index in the waveform
    pub index: usize,
    /// Time of the sample (s)
    pub time: f64,
    /// Voltage at the peak (V)
    pub voltage: f64,
    /// Height above the higher of the two surrounding valley floors (V)
    pub prominence: f64,
}

/// Peak detection thresholds
#[derive(Debug, Clone)]
pub struct PeakFinder {
    min_height: f64,
    min_distance: usize,
    min_prominence: f64,
}

impl PeakFinder {
    pub fn from_params(params: &PeakParams) -> Self {
        Self {
            min_height: params.min_height,
            min_distance: params.min_distance,
            min_prominence: params.min_prominence,
        }
    }

    /// Find pulse peaks in a waveform, in time order
    pub fn find_peaks(&self, waveform: &Waveform) -> Vec<Peak> {
        let signal = &waveform.voltage;
        self.find_peak_indices(signal)
            .into_iter()
            .map(|index| Peak {
                index,
                time: waveform.time[index],
                voltage: signal[index],
                prominence: prominence(signal, index),
            })
            .collect()
    }

    /// Indices of accepted peaks in ascending order
    pub fn find_peak_indices(&self, signal: &[f64]) -> Vec<usize> {
        let mut peaks: Vec<usize> = local_maxima(signal)
            .into_iter()
            .filter(|&i| signal[i] >= self.min_height)
            .collect();

        if self.min_distance > 1 && peaks.len() > 1 {
            peaks = select_by_distance(signal, &peaks, self.min_distance);
        }

        peaks.retain(|&i| prominence(signal, i) >= self.min_prominence);
        peaks
    }
}

/// Local maxima, flat tops reported once at their middle (rounded down).
/// The first and last samples are never maxima.
fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let n = signal.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i < n - 1 {
        if signal[i - 1] < signal[i] {
            // Walk over a possible plateau
            let mut ahead = i + 1;
            while ahead < n - 1 && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                let right = ahead - 1;
                maxima.push((i + right) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    maxima
}

/// Keep the tallest peaks, discarding any lower peak within `distance`
/// samples of one already kept.
fn select_by_distance(signal: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    let n = peaks.len();
    let mut keep = vec![true; n];

    // Ascending by height; walked backwards so the tallest goes first and
    // among equal heights the later peak wins.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| signal[peaks[a]].total_cmp(&signal[peaks[b]]));

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < n && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

/// Prominence of the sample at `peak`: walk each way until a strictly higher
/// sample or the edge, take the lowest point seen, and measure the peak
/// against the higher of the two.
pub fn prominence(signal: &[f64], peak: usize) -> f64 {
    let height = signal[peak];

    let mut left_min = height;
    for &v in signal[..=peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &signal[peak..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

/// Format peaks as a text table
pub fn format_text(peaks: &[Peak]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:>8}  {:>12}  {:>10}  {:>10}\n",
        "#", "Index", "Time (s)", "V", "Prominence"
    ));
    output.push_str(&"─".repeat(52));
    output.push('\n');
    for (i, peak) in peaks.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:>8}  {:>12.6}  {:>10.4}  {:>10.4}\n",
            i + 1,
            peak.index,
            peak.time,
            peak.voltage,
            peak.prominence
        ));
    }
    if peaks.is_empty() {
        output.push_str("  No peaks found above threshold\n");
    }
    output
}
