use std::path::Path;

use crate::analysis::analyze;
use crate::analysis::power::power_series;
use crate::color::TraceColors;
use crate::config::Config;
use crate::data::loader::load_csv;
use crate::data::model::Waveform;
use crate::report::AnalysisReport;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which quantity the central chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    #[default]
    Voltage,
    Power,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Constants and thresholds every reload is analysed with.
    pub config: Config,

    /// Loaded capture (None until a file is loaded).
    pub waveform: Option<Waveform>,

    /// Result of the last successful analysis.
    pub report: Option<AnalysisReport>,

    /// Instantaneous power per sample (cached for the power view).
    pub power: Vec<f64>,

    pub plot_mode: PlotMode,

    /// Draw a marker on every sample, not just the line.
    pub show_points: bool,

    /// Highlight detected peaks.
    pub show_peaks: bool,

    pub colors: TraceColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            waveform: None,
            report: None,
            power: Vec::new(),
            plot_mode: PlotMode::default(),
            show_points: true,
            show_peaks: true,
            colors: TraceColors::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded waveform and run the analysis over it.
    ///
    /// The waveform is kept for plotting even when the analysis fails, so the
    /// user can see what was loaded.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        match analyze(&waveform, &self.config) {
            Ok(report) => self.set_analysis(waveform, report),
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.power = power_series(&waveform.voltage, &self.config.rig);
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
                self.waveform = Some(waveform);
            }
        }
    }

    /// Install a waveform together with an analysis already run over it.
    pub fn set_analysis(&mut self, waveform: Waveform, report: AnalysisReport) {
        self.power = power_series(&waveform.voltage, &self.config.rig);
        self.report = Some(report);
        self.status_message = None;
        self.waveform = Some(waveform);
    }

    /// Load a capture from disk, replacing the current one on success.
    pub fn open_path(&mut self, path: &Path) {
        match load_csv(path) {
            Ok(waveform) => self.set_waveform(waveform),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
