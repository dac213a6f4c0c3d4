use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Rig constants
// ---------------------------------------------------------------------------

/// Physical constants of the test rig. Fixed per experiment, never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Load resistance across which the coil output is measured (Ω).
    pub load_resistance_ohms: f64,
    /// Voltage divider multiplier (a 20:1 divider means ×21).
    pub divider_ratio: f64,
    /// Distance between the two timing coils (m).
    pub coil_spacing_m: f64,
    /// Projectile mass (g).
    pub projectile_mass_g: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            load_resistance_ohms: 1.1,
            divider_ratio: 21.0,
            coil_spacing_m: 0.59,
            projectile_mass_g: 190.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Peak detection parameters
// ---------------------------------------------------------------------------

/// Thresholds for coil pulse detection, tuned per waveform shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// Minimum peak voltage (V).
    pub min_height: f64,
    /// Minimum horizontal distance between accepted peaks (samples).
    pub min_distance: usize,
    /// Minimum prominence above the surrounding valleys (V).
    pub min_prominence: f64,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            min_height: 0.1,
            min_distance: 100,
            min_prominence: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Peak selection policy
// ---------------------------------------------------------------------------

/// Which detected pulses bound the transit between the coils.
///
/// Ordinals are zero-based positions in the list of detected peaks. The
/// default pairs the first rising pulse with the fourth one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakSelection {
    pub start_peak: usize,
    pub end_peak: usize,
}

impl Default for PeakSelection {
    fn default() -> Self {
        Self {
            start_peak: 0,
            end_peak: 3,
        }
    }
}

impl PeakSelection {
    /// Number of detected peaks needed before a velocity can be estimated.
    pub fn required_peaks(&self) -> usize {
        self.end_peak.saturating_add(1)
    }
}

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

/// Everything that parameterises one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rig: RigConfig,
    pub peaks: PeakParams,
    pub selection: PeakSelection,
    /// Optional photo of the rig layout shown next to the chart.
    pub setup_image: Option<PathBuf>,
}

impl Config {
    /// Read a JSON configuration file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the physics meaningless.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let rig = &self.rig;
        let positive = [
            ("rig.load_resistance_ohms", rig.load_resistance_ohms),
            ("rig.divider_ratio", rig.divider_ratio),
            ("rig.coil_spacing_m", rig.coil_spacing_m),
            ("rig.projectile_mass_g", rig.projectile_mass_g),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.peaks.min_distance == 0 {
            return Err(AnalysisError::InvalidConfig(
                "peaks.min_distance must be at least 1 sample".into(),
            ));
        }
        if self.selection.end_peak.checked_add(1).is_none() {
            return Err(AnalysisError::InvalidConfig(format!(
                "selection.end_peak ({}) is out of range",
                self.selection.end_peak
            )));
        }
        if self.selection.end_peak <= self.selection.start_peak {
            return Err(AnalysisError::InvalidConfig(format!(
                "selection.end_peak ({}) must come after selection.start_peak ({})",
                self.selection.end_peak, self.selection.start_peak
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rig_constants() {
        let config = Config::default();
        assert_eq!(config.rig.load_resistance_ohms, 1.1);
        assert_eq!(config.rig.divider_ratio, 21.0);
        assert_eq!(config.rig.coil_spacing_m, 0.59);
        assert_eq!(config.rig.projectile_mass_g, 190.0);
        assert_eq!(config.peaks.min_distance, 100);
        assert_eq!(config.selection.required_peaks(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "rig": { "coil_spacing_m": 0.75 }, "peaks": { "min_height": 0.2 } }"#)
                .unwrap();
        assert_eq!(config.rig.coil_spacing_m, 0.75);
        assert_eq!(config.rig.load_resistance_ohms, 1.1);
        assert_eq!(config.peaks.min_height, 0.2);
        assert_eq!(config.peaks.min_prominence, 0.05);
        assert_eq!(config.selection, PeakSelection::default());
    }

    #[test]
    fn rejects_non_positive_resistance() {
        let mut config = Config::default();
        config.rig.load_resistance_ohms = 0.0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(msg)) if msg.contains("load_resistance_ohms")
        ));
    }

    #[test]
    fn rejects_backwards_selection() {
        let mut config = Config::default();
        config.selection = PeakSelection {
            start_peak: 2,
            end_peak: 2,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_end_peak_at_usize_max() {
        let json = format!(r#"{{ "selection": {{ "end_peak": {} }} }}"#, usize::MAX);
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.selection.required_peaks(), usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(msg)) if msg.contains("end_peak")
        ));
    }

    #[test]
    fn rejects_zero_min_distance() {
        let mut config = Config::default();
        config.peaks.min_distance = 0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(msg)) if msg.contains("min_distance")
        ));
    }

    #[test]
    fn reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{ "selection": { "start_peak": 1, "end_peak": 2 } }"#,
        )
        .unwrap();
        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.selection.required_peaks(), 3);
    }
}
