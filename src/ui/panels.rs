use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use crate::analysis::velocity::VelocityOutcome;
use crate::state::{AppState, PlotMode};

// ---------------------------------------------------------------------------
// Left side panel – analysis summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(path) = &state.config.setup_image {
                let uri = format!("file://{}", path.display());
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.add(
                        egui::Image::new(uri)
                            .max_width(ui.available_width() * 0.95)
                            .max_height(180.0)
                            .rounding(4.0),
                    );
                    ui.small("Rig setup");
                });
                ui.add_space(4.0);
            }

            let Some(report) = &state.report else {
                ui.heading("Analysis");
                ui.separator();
                ui.label("No analysis available.");
                return;
            };

            ui.heading("Voltage");
            ui.separator();
            let v = &report.voltage;
            Grid::new("voltage_stats").striped(true).show(ui, |ui: &mut Ui| {
                row(ui, "Samples", format!("{}", v.count));
                row(ui, "Dropped rows", format!("{}", report.load.rows_dropped));
                row(ui, "Min", format!("{:.5} V", v.min));
                row(ui, "Max", format!("{:.5} V", v.max));
                row(ui, "Mean", format!("{:.5} V", v.mean));
                row(
                    ui,
                    "Std",
                    v.std_dev
                        .map(|s| format!("{s:.5} V"))
                        .unwrap_or_else(|| "n/a".into()),
                );
                row(ui, "Peak-to-peak", format!("{:.5} V", v.peak_to_peak));
                row(ui, "RMS", format!("{:.5} V", v.rms));
            });

            ui.add_space(8.0);
            ui.heading("Power");
            ui.separator();
            let p = &report.power;
            Grid::new("power_stats").striped(true).show(ui, |ui: &mut Ui| {
                row(ui, "Average", format!("{:.5} W", p.average_w));
                row(ui, "Max", format!("{:.5} W", p.max_w));
            });

            ui.add_space(8.0);
            ui.heading("Velocity");
            ui.separator();
            match &report.velocity {
                VelocityOutcome::Estimated(est) => {
                    Grid::new("velocity").striped(true).show(ui, |ui: &mut Ui| {
                        row(ui, "Peaks", format!("{}", report.peaks.len()));
                        row(ui, "Δt", format!("{:.6} s", est.transit_time));
                        row(ui, "Spacing", format!("{:.3} m", est.coil_spacing_m));
                        row(ui, "Speed", format!("{:.2} m/s", est.speed));
                        row(ui, "Energy", format!("{:.3} J", est.kinetic_energy_j));
                    });
                }
                VelocityOutcome::NotEnoughPeaks { found, required } => {
                    ui.label(
                        RichText::new(format!(
                            "Not enough peaks: found {found}, need {required}"
                        ))
                        .color(Color32::YELLOW),
                    );
                }
                VelocityOutcome::NonPositiveTransit {
                    start_time,
                    end_time,
                } => {
                    ui.label(
                        RichText::new(format!(
                            "Peak times not increasing: {start_time:.6} s → {end_time:.6} s"
                        ))
                        .color(Color32::YELLOW),
                    );
                }
            }

            ui.add_space(8.0);
            egui::CollapsingHeader::new(RichText::new("Configuration").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    let cfg = &state.config;
                    Grid::new("config").show(ui, |ui: &mut Ui| {
                        row(ui, "Load", format!("{} Ω", cfg.rig.load_resistance_ohms));
                        row(ui, "Divider", format!("×{}", cfg.rig.divider_ratio));
                        row(ui, "Coil spacing", format!("{} m", cfg.rig.coil_spacing_m));
                        row(ui, "Mass", format!("{} g", cfg.rig.projectile_mass_g));
                        row(ui, "Min height", format!("{} V", cfg.peaks.min_height));
                        row(ui, "Min distance", format!("{} samples", cfg.peaks.min_distance));
                        row(ui, "Min prominence", format!("{} V", cfg.peaks.min_prominence));
                        row(
                            ui,
                            "Pulses",
                            format!(
                                "#{} → #{}",
                                cfg.selection.start_peak.saturating_add(1),
                                cfg.selection.end_peak.saturating_add(1)
                            ),
                        );
                    });
                });
        });
}

fn row(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.monospace(value);
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(wf) = &state.waveform {
            ui.label(format!(
                "{}: {} samples",
                wf.source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                wf.len()
            ));
        }

        ui.separator();

        ui.selectable_value(&mut state.plot_mode, PlotMode::Voltage, "Voltage");
        ui.selectable_value(&mut state.plot_mode, PlotMode::Power, "Power");
        ui.checkbox(&mut state.show_points, "Points");
        ui.checkbox(&mut state.show_peaks, "Peaks");

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open scope capture")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
