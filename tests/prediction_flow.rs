use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use sales_predictor::data::align::align;
use sales_predictor::data::export;
use sales_predictor::data::loader::load_csv;
use sales_predictor::data::table::{CellValue, PredictionTable};
use sales_predictor::model::artifact::{LoadedModel, ModelArtifact};
use sales_predictor::model::regressor::Regressor;
use sales_predictor::state::{AppState, FormInput, StatusMessage, UploadedCsv};
use tempfile::TempDir;

const FEATURES: [&str; 8] = [
    "Store",
    "DayOfWeek",
    "Promo",
    "Month",
    "Year",
    "WeekOfYear",
    "StateHoliday",
    "SchoolHoliday",
];

fn write_model(dir: &Path, name: &str, regressor: Regressor) {
    let artifact = ModelArtifact {
        expected_features: FEATURES.iter().map(|f| f.to_string()).collect(),
        regressor,
    };
    fs::write(dir.join(name), serde_json::to_string(&artifact).unwrap()).unwrap();
}

/// Sums the features, so expected outputs are easy to compute by hand.
fn sum_model() -> Regressor {
    Regressor {
        intercept: 0.0,
        coefficients: vec![1.0; FEATURES.len()],
    }
}

#[test]
fn manual_form_prediction_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_model(dir.path(), "sales_model_1.json", sum_model());

    let mut state = AppState::startup(dir.path());
    assert!(state.fatal_error.is_none());

    // Monday 2024-01-15 is ISO week 3.
    state.form = FormInput {
        store_id: 1,
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        promo: true,
        state_holiday: false,
        school_holiday: false,
    };
    state.run_prediction();

    let prediction = state.prediction.as_ref().expect("prediction ran");
    assert_eq!(prediction.aligned.columns, FEATURES);
    assert_eq!(
        prediction.aligned.rows[0],
        vec![
            CellValue::Integer(1),    // Store
            CellValue::Integer(0),    // DayOfWeek (Monday)
            CellValue::Integer(1),    // Promo
            CellValue::Integer(1),    // Month
            CellValue::Integer(2024), // Year
            CellValue::Integer(3),    // WeekOfYear
            CellValue::Integer(0),    // StateHoliday
            CellValue::Integer(0),    // SchoolHoliday
        ]
    );
    // 1 + 0 + 1 + 1 + 2024 + 3 + 0 + 0
    assert_eq!(prediction.predicted, vec![2030]);

    // No zero-fill was needed for the form row.
    assert!(state.align_report.as_ref().unwrap().is_clean());
    assert!(matches!(state.status, Some(StatusMessage::Success(_))));
}

#[test]
fn bulk_csv_prediction_with_alignment_and_download() {
    let dir = TempDir::new().unwrap();
    write_model(dir.path(), "sales_model_1.json", sum_model());

    // A CSV with a missing expected column (Promo), shuffled order, and an
    // extra column the model never saw.
    let csv_path = dir.path().join("bulk.csv");
    let mut f = fs::File::create(&csv_path).unwrap();
    writeln!(f, "Comment,Year,Store,DayOfWeek,Month,WeekOfYear,StateHoliday,SchoolHoliday").unwrap();
    writeln!(f, "north,2024,3,2,5,20,0,1").unwrap();
    writeln!(f, "south,2024,4,3,5,20,1,0").unwrap();
    drop(f);

    let mut state = AppState::startup(dir.path());
    let table = load_csv(&csv_path).unwrap();
    state.set_upload(UploadedCsv {
        path: csv_path,
        table,
    });
    state.run_prediction();

    let prediction = state.prediction.as_ref().expect("prediction ran");
    assert_eq!(prediction.aligned.columns, FEATURES);

    let report = state.align_report.as_ref().unwrap();
    assert_eq!(report.filled, vec!["Promo".to_string()]);
    assert_eq!(report.dropped, vec!["Comment".to_string()]);

    // 3 + 2 + 0 + 5 + 2024 + 20 + 0 + 1 and 4 + 3 + 0 + 5 + 2024 + 20 + 1 + 0
    assert_eq!(prediction.predicted, vec![2055, 2057]);

    // Download the result and check the emitted CSV.
    let out_path = dir.path().join(export::DOWNLOAD_FILENAME);
    export::write_csv(&out_path, prediction).unwrap();
    let text = fs::read_to_string(&out_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Store,DayOfWeek,Promo,Month,Year,WeekOfYear,StateHoliday,SchoolHoliday,PredictedSales"
    );
    assert_eq!(lines.next().unwrap(), "3,2,0,5,2024,20,0,1,2055");
    assert_eq!(lines.next().unwrap(), "4,3,0,5,2024,20,1,0,2057");
}

#[test]
fn failed_prediction_keeps_previous_result() {
    let dir = TempDir::new().unwrap();
    // Wrong coefficient count: prediction always fails with a shape error.
    write_model(
        dir.path(),
        "sales_model_1.json",
        Regressor {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        },
    );

    let mut state = AppState::startup(dir.path());
    state.run_prediction();

    assert!(state.prediction.is_none());
    match &state.status {
        Some(StatusMessage::Error(msg)) => {
            assert!(msg.contains("Error during prediction"));
            assert!(msg.contains("expects 2 features"));
        }
        other => panic!("expected error status, got {other:?}"),
    }

    // The form stays usable: a later attempt against a good model works.
    std::thread::sleep(std::time::Duration::from_millis(30));
    write_model(dir.path(), "sales_model_2.json", sum_model());
    let mut state = AppState::startup(dir.path());
    assert_eq!(
        state.model.as_ref().unwrap().file_name(),
        "sales_model_2.json"
    );
    state.run_prediction();
    assert!(state.prediction.is_some());
}

#[test]
fn align_then_predict_is_total_even_for_disjoint_input() {
    let artifact = ModelArtifact {
        expected_features: FEATURES.iter().map(|f| f.to_string()).collect(),
        regressor: Regressor {
            intercept: 7.0,
            coefficients: vec![1.0; FEATURES.len()],
        },
    };

    // None of the expected columns are present.
    let mut row = std::collections::BTreeMap::new();
    row.insert("Unrelated".to_string(), CellValue::Text("x".into()));
    let input = sales_predictor::data::table::InputTable {
        columns: vec!["Unrelated".to_string()],
        rows: vec![row],
    };

    let (aligned, report) = align(&input, &artifact.expected_features);
    assert_eq!(report.filled.len(), FEATURES.len());
    let raw = artifact.regressor.predict(&aligned).unwrap();
    let table = PredictionTable::new(aligned, raw);
    // All-zero features leave only the intercept.
    assert_eq!(table.predicted, vec![7]);
}

#[test]
fn loaded_model_reports_its_file_name() {
    let dir = TempDir::new().unwrap();
    write_model(dir.path(), "sales_model_20240115.json", sum_model());
    let model = LoadedModel::from_dir(dir.path()).unwrap();
    assert_eq!(model.file_name(), "sales_model_20240115.json");
    assert_eq!(model.artifact.expected_features.len(), 8);
}
