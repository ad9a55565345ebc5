use std::path::Path;

use eframe::egui;
use sales_predictor::app::SalesPredictorApp;
use sales_predictor::model::artifact::DEFAULT_MODEL_DIR;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(SalesPredictorApp::new(Path::new(DEFAULT_MODEL_DIR))))),
    )
}
