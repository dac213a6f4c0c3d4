use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::peaks::Peak;
use crate::analysis::power::PowerReport;
use crate::analysis::statistics::VoltageStats;
use crate::analysis::velocity::VelocityOutcome;
use crate::data::model::LoadSummary;

// ---------------------------------------------------------------------------
// AnalysisReport – everything one run produced
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub load: LoadSummary,
    pub voltage: VoltageStats,
    pub power: PowerReport,
    pub peaks: Vec<Peak>,
    pub velocity: VelocityOutcome,
}

impl AnalysisReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Console rendering of the report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let v = &self.voltage;
        writeln!(out, "Source: {}", self.source.display())?;
        writeln!(
            out,
            "  {} samples kept, {} rows dropped",
            self.load.rows_kept(),
            self.load.rows_dropped
        )?;
        writeln!(out)?;

        writeln!(out, "Voltage Statistics:")?;
        writeln!(out, "  min  : {:.6} V", v.min)?;
        writeln!(out, "  max  : {:.6} V", v.max)?;
        writeln!(out, "  mean : {:.6} V", v.mean)?;
        match v.std_dev {
            Some(std) => writeln!(out, "  std  : {std:.6} V")?,
            None => writeln!(out, "  std  : n/a (single sample)")?,
        }
        writeln!(out, "Peak-to-Peak Voltage: {} V", v.peak_to_peak)?;
        writeln!(out, "RMS Voltage: {} V", v.rms)?;
        writeln!(out)?;

        let p = &self.power;
        writeln!(out, "Power Statistics:")?;
        writeln!(out, "  Average Power        : {:.5} W", p.average_w)?;
        writeln!(out, "  Max Instantaneous    : {:.5} W", p.max_w)?;
        writeln!(out, "  Peak-to-Peak Voltage : {:.5} V", p.peak_to_peak_v)?;
        writeln!(out, "  RMS Voltage          : {:.5} V", p.rms_v)?;
        writeln!(out)?;

        match &self.velocity {
            VelocityOutcome::Estimated(est) => {
                writeln!(out, "Velocity Estimate from Coil Peaks:")?;
                writeln!(out, "  Peak Times (s)        : [{}]", peak_times(&self.peaks))?;
                writeln!(out, "  Time Between Peaks    : {:.6} s", est.transit_time)?;
                writeln!(out, "  Coil Spacing          : {:.3} m", est.coil_spacing_m)?;
                writeln!(out, "  Estimated Speed       : {:.2} m/s", est.speed)?;
                writeln!(out, "  Kinetic Energy        : {:.3} J", est.kinetic_energy_j)?;
            }
            VelocityOutcome::NotEnoughPeaks { found, required } => {
                writeln!(out, "Not enough peaks found to estimate velocity.")?;
                writeln!(out, "  found {found}, need {required}")?;
            }
            VelocityOutcome::NonPositiveTransit {
                start_time,
                end_time,
            } => {
                writeln!(out, "Velocity not estimated: non-positive time between peaks.")?;
                writeln!(out, "  Start Peak Time       : {start_time:.6} s")?;
                writeln!(out, "  End Peak Time         : {end_time:.6} s")?;
            }
        }
        Ok(())
    }
}

fn peak_times(peaks: &[Peak]) -> String {
    peaks
        .iter()
        .map(|p| format!("{:.6}", p.time))
        .collect::<Vec<_>>()
        .join(", ")
}
