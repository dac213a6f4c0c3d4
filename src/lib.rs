//! Waveform analysis for a coil-timed propulsion rig.
//!
//! Loads one oscilloscope capture, reports voltage and power figures, and
//! estimates projectile speed from the timing of coil pulses.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod state;
pub mod ui;

pub use analysis::analyze;
pub use config::Config;
pub use data::loader::load_csv;
pub use error::AnalysisError;
pub use report::AnalysisReport;
