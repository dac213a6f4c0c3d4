use eframe::egui::Ui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::VOLTAGE_NAME;
use crate::state::{AppState, PlotMode};

// ---------------------------------------------------------------------------
// Waveform plot (central panel)
// ---------------------------------------------------------------------------

/// Render the waveform chart in the central panel.
pub fn waveform_plot(ui: &mut Ui, state: &AppState) {
    let waveform = match &state.waveform {
        Some(wf) => wf,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a scope capture to view it  (File → Open…)");
            });
            return;
        }
    };

    let (title, name, y_label, values, color) = match state.plot_mode {
        PlotMode::Voltage => (
            "Voltage (V) vs Time (s)",
            VOLTAGE_NAME,
            "Volts (V)",
            &waveform.voltage,
            state.colors.voltage,
        ),
        PlotMode::Power => (
            "Instantaneous Power (W) vs Time (s)",
            "P",
            "Watts (W)",
            &state.power,
            state.colors.power,
        ),
    };

    ui.heading(title);

    let series: Vec<[f64; 2]> = waveform
        .time
        .iter()
        .zip(values.iter())
        .map(|(&t, &y)| [t, y])
        .collect();

    let peak_marks: Vec<[f64; 2]> = match (&state.report, state.show_peaks) {
        (Some(report), true) => report
            .peaks
            .iter()
            .filter_map(|p| Some([p.time, *values.get(p.index)?]))
            .collect(),
        _ => Vec::new(),
    };

    Plot::new("waveform_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Seconds (s)")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .name(name)
                    .color(color)
                    .width(1.5),
            );

            if state.show_points {
                plot_ui.points(
                    Points::new(PlotPoints::from(series))
                        .shape(MarkerShape::Circle)
                        .radius(1.5)
                        .color(color),
                );
            }

            if !peak_marks.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(peak_marks))
                        .name("Peaks")
                        .shape(MarkerShape::Diamond)
                        .radius(5.0)
                        .filled(true)
                        .color(state.colors.peaks),
                );
            }
        });
}
