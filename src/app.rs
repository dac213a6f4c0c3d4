use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RocketScopeApp {
    pub state: AppState,
}

impl RocketScopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RocketScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::waveform_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run(state: AppState) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rocket Scope – Waveform Viewer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the rig photo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(RocketScopeApp::new(state)))
        }),
    )
}
