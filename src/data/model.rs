use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names of the oscilloscope export
// ---------------------------------------------------------------------------

/// Header of the time column in the scope CSV.
pub const TIME_COLUMN: &str = "Time (s)";
/// Header of the channel-1 voltage column in the scope CSV.
pub const VOLTAGE_COLUMN: &str = "Ch1 (V)";
/// Short name the voltage column is known by once cleaned.
pub const VOLTAGE_NAME: &str = "V";
/// Token the scope writes when a channel reading is out of range.
pub const MISSING_TOKEN: &str = "undefined";

// ---------------------------------------------------------------------------
// Sample – one row of the capture
// ---------------------------------------------------------------------------

/// A single (time, voltage) reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the scope trigger.
    pub time: f64,
    /// Channel voltage (V).
    pub voltage: f64,
}

// ---------------------------------------------------------------------------
// LoadSummary – bookkeeping from the cleaning step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

impl LoadSummary {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }
}

// ---------------------------------------------------------------------------
// Waveform – the cleaned capture
// ---------------------------------------------------------------------------

/// The cleaned capture, stored column-wise.
///
/// Invariant: `time.len() == voltage.len()` and no value is missing. Time is
/// expected to increase but this is not enforced.
#[derive(Debug, Clone, Default)]
pub struct Waveform {
    /// File the capture was read from (empty for in-memory data).
    pub source: PathBuf,
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub summary: LoadSummary,
}

impl Waveform {
    /// Build a waveform from samples that are already clean.
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        let (time, voltage): (Vec<f64>, Vec<f64>) =
            samples.into_iter().map(|s| (s.time, s.voltage)).unzip();
        let summary = LoadSummary {
            rows_read: time.len(),
            rows_dropped: 0,
        };
        Waveform {
            source: PathBuf::new(),
            time,
            voltage,
            summary,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// Whether the waveform has no samples.
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_keeps_order() {
        let wf = Waveform::from_samples([
            Sample { time: 0.0, voltage: 1.0 },
            Sample { time: 0.1, voltage: -1.0 },
        ]);
        assert_eq!(wf.len(), 2);
        assert_eq!(wf.time, vec![0.0, 0.1]);
        assert_eq!(wf.voltage, vec![1.0, -1.0]);
        assert_eq!(wf.summary.rows_kept(), 2);
    }
}
