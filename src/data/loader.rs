use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{LoadSummary, Waveform, MISSING_TOKEN, TIME_COLUMN, VOLTAGE_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a scope capture.
///
/// CSV layout: header row containing at least `Time (s)` and `Ch1 (V)`.
/// Other columns are ignored. A row is dropped when either reading is the
/// `undefined` token or does not parse as a float.
pub fn load_csv(path: &Path) -> Result<Waveform> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let mut waveform =
        read_waveform(file).with_context(|| format!("loading {}", path.display()))?;
    waveform.source = path.to_path_buf();

    log::info!(
        "Loaded {} samples from {} ({} of {} rows dropped)",
        waveform.len(),
        path.display(),
        waveform.summary.rows_dropped,
        waveform.summary.rows_read
    );
    Ok(waveform)
}

/// Parse a capture from any reader. The returned waveform has no source path.
pub fn read_waveform<R: Read>(input: R) -> Result<Waveform> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let time_idx = headers
        .iter()
        .position(|h| h == TIME_COLUMN)
        .with_context(|| format!("CSV missing '{TIME_COLUMN}' column"))?;
    let volt_idx = headers
        .iter()
        .position(|h| h == VOLTAGE_COLUMN)
        .with_context(|| format!("CSV missing '{VOLTAGE_COLUMN}' column"))?;

    let mut time = Vec::new();
    let mut voltage = Vec::new();
    let mut summary = LoadSummary::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        summary.rows_read += 1;

        let t = record.get(time_idx).and_then(parse_reading);
        let v = record.get(volt_idx).and_then(parse_reading);
        match (t, v) {
            (Some(t), Some(v)) => {
                time.push(t);
                voltage.push(v);
            }
            _ => {
                log::debug!("dropping CSV row {row_no}: {:?}", record);
                summary.rows_dropped += 1;
            }
        }
    }

    Ok(Waveform {
        source: Default::default(),
        time,
        voltage,
        summary,
    })
}

/// Non-strict float coercion: the missing token, blanks, garbage and
/// non-finite values all read as absent.
fn parse_reading(field: &str) -> Option<f64> {
    if field.is_empty() || field == MISSING_TOKEN {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}
