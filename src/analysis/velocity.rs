//! Projectile speed from coil pulse timing.

use serde::Serialize;

use crate::config::{PeakSelection, RigConfig};

use super::peaks::Peak;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VelocityEstimate {
    /// Time of the pulse marking entry to the timed section (s)
    pub start_time: f64,
    /// Time of the pulse marking exit (s)
    pub end_time: f64,
    /// `end_time - start_time` (s)
    pub transit_time: f64,
    pub coil_spacing_m: f64,
    /// m/s
    pub speed: f64,
    /// ½ m v² (J)
    pub kinetic_energy_j: f64,
}

/// Result of trying to estimate a velocity from the detected peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VelocityOutcome {
    Estimated(VelocityEstimate),
    NotEnoughPeaks { found: usize, required: usize },
    /// The end pulse does not come after the start pulse in time.
    NonPositiveTransit { start_time: f64, end_time: f64 },
}

impl VelocityOutcome {
    pub fn estimate(&self) -> Option<&VelocityEstimate> {
        match self {
            VelocityOutcome::Estimated(est) => Some(est),
            VelocityOutcome::NotEnoughPeaks { .. }
            | VelocityOutcome::NonPositiveTransit { .. } => None,
        }
    }
}

/// Pick the start/end pulses named by `selection` and convert the transit
/// time across the coil spacing into a speed.
///
/// Too few peaks and a transit time that is not positive are both reported
/// as outcomes, so the rest of the analysis still stands.
pub fn estimate_velocity(
    peaks: &[Peak],
    selection: &PeakSelection,
    rig: &RigConfig,
) -> VelocityOutcome {
    let required = selection.required_peaks();
    let (Some(start), Some(end)) = (peaks.get(selection.start_peak), peaks.get(selection.end_peak))
    else {
        log::warn!(
            "Only {} peak(s) detected; velocity needs {required}",
            peaks.len()
        );
        return VelocityOutcome::NotEnoughPeaks {
            found: peaks.len(),
            required,
        };
    };

    let transit_time = end.time - start.time;
    if !(transit_time > 0.0) {
        log::warn!(
            "Peak at t={}s does not follow peak at t={}s; time column is not increasing",
            end.time,
            start.time
        );
        return VelocityOutcome::NonPositiveTransit {
            start_time: start.time,
            end_time: end.time,
        };
    }

    let speed = rig.coil_spacing_m / transit_time;
    let mass_kg = rig.projectile_mass_g / 1000.0;

    VelocityOutcome::Estimated(VelocityEstimate {
        start_time: start.time,
        end_time: end.time,
        transit_time,
        coil_spacing_m: rig.coil_spacing_m,
        speed,
        kinetic_energy_j: 0.5 * mass_kg * speed * speed,
    })
}
