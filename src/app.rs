use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesPredictorApp {
    pub state: AppState,
}

impl SalesPredictorApp {
    /// Build the application context: the newest artifact is loaded once
    /// here and held for the whole session.
    pub fn new(model_dir: &Path) -> Self {
        Self {
            state: AppState::startup(model_dir),
        }
    }
}

impl eframe::App for SalesPredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: model banner + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: input form ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: predictions ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::results_panel(ui, &mut self.state);
        });
    }
}
