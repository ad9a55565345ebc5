use std::fs;
use std::path::Path;

use sales_predictor::model::artifact::{ModelArtifact, ARTIFACT_PREFIX, DEFAULT_MODEL_DIR};
use sales_predictor::model::regressor::Regressor;

/// Write a demo artifact so the app can be exercised without the external
/// training pipeline. Coefficients are hand-tuned to give plausible daily
/// sales figures for the Rossmann feature set.
fn main() -> anyhow::Result<()> {
    let artifact = ModelArtifact {
        expected_features: vec![
            "Store".to_string(),
            "DayOfWeek".to_string(),
            "Promo".to_string(),
            "Month".to_string(),
            "Year".to_string(),
            "WeekOfYear".to_string(),
            "StateHoliday".to_string(),
            "SchoolHoliday".to_string(),
        ],
        regressor: Regressor {
            intercept: 5200.0,
            coefficients: vec![0.8, -120.0, 1450.0, 35.0, 0.0, 4.0, -2600.0, 180.0],
        },
    };

    let dir = Path::new(DEFAULT_MODEL_DIR);
    fs::create_dir_all(dir)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{ARTIFACT_PREFIX}{stamp}.json"));
    fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;

    println!(
        "Wrote demo model with {} features to {}",
        artifact.expected_features.len(),
        path.display()
    );
    Ok(())
}
