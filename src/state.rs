use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::data::align::{align, AlignReport};
use crate::data::table::{CellValue, InputTable, PredictionTable};
use crate::model::artifact::LoadedModel;

// ---------------------------------------------------------------------------
// Manual form input
// ---------------------------------------------------------------------------

/// The sidebar form fields. Date features (day of week, month, year, ISO
/// week) are derived from the chosen date when the row is built.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub store_id: u32,
    pub date: NaiveDate,
    pub promo: bool,
    pub state_holiday: bool,
    pub school_holiday: bool,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            store_id: 1,
            date: chrono::Local::now().date_naive(),
            promo: false,
            state_holiday: false,
            school_holiday: false,
        }
    }
}

impl FormInput {
    /// Build the single-row input table. Monday is day-of-week 0.
    pub fn to_table(&self) -> InputTable {
        let columns = vec![
            "Store".to_string(),
            "DayOfWeek".to_string(),
            "Promo".to_string(),
            "Month".to_string(),
            "Year".to_string(),
            "WeekOfYear".to_string(),
            "StateHoliday".to_string(),
            "SchoolHoliday".to_string(),
        ];

        let mut row = BTreeMap::new();
        row.insert(
            "Store".to_string(),
            CellValue::Integer(i64::from(self.store_id)),
        );
        row.insert(
            "DayOfWeek".to_string(),
            CellValue::Integer(i64::from(self.date.weekday().num_days_from_monday())),
        );
        row.insert(
            "Promo".to_string(),
            CellValue::Integer(i64::from(self.promo)),
        );
        row.insert(
            "Month".to_string(),
            CellValue::Integer(i64::from(self.date.month())),
        );
        row.insert(
            "Year".to_string(),
            CellValue::Integer(i64::from(self.date.year())),
        );
        row.insert(
            "WeekOfYear".to_string(),
            CellValue::Integer(i64::from(self.date.iso_week().week())),
        );
        row.insert(
            "StateHoliday".to_string(),
            CellValue::Integer(i64::from(self.state_holiday)),
        );
        row.insert(
            "SchoolHoliday".to_string(),
            CellValue::Integer(i64::from(self.school_holiday)),
        );

        InputTable {
            columns,
            rows: vec![row],
        }
    }
}

// ---------------------------------------------------------------------------
// Uploaded CSV
// ---------------------------------------------------------------------------

/// A bulk CSV chosen by the user; replaces the form row until cleared.
#[derive(Debug, Clone)]
pub struct UploadedCsv {
    pub path: PathBuf,
    pub table: InputTable,
}

impl UploadedCsv {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// Status banner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The model artifact is loaded
/// once at startup and held here for the whole session.
pub struct AppState {
    /// The loaded model, or None when startup failed.
    pub model: Option<LoadedModel>,

    /// Set when no usable model exists; the app halts further processing.
    pub fatal_error: Option<String>,

    /// Sidebar form fields.
    pub form: FormInput,

    /// Optional bulk input; takes precedence over the form.
    pub uploaded: Option<UploadedCsv>,

    /// Result of the last successful prediction.
    pub prediction: Option<PredictionTable>,

    /// What alignment changed for the last prediction (zero-filled and
    /// dropped columns), surfaced next to the result.
    pub align_report: Option<AlignReport>,

    /// Success / error message shown in the top bar.
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Load the newest artifact from `dir`. A failure here is the fatal
    /// "no model" condition: the banner shows it and nothing else runs.
    pub fn startup(dir: &Path) -> Self {
        let (model, fatal_error) = match LoadedModel::from_dir(dir) {
            Ok(model) => {
                log::info!(
                    "Loaded model {} expecting features {:?}",
                    model.file_name(),
                    model.artifact.expected_features
                );
                (Some(model), None)
            }
            Err(e) => {
                log::error!("Model startup failed: {e}");
                (None, Some(e.to_string()))
            }
        };

        Self {
            model,
            fatal_error,
            form: FormInput::default(),
            uploaded: None,
            prediction: None,
            align_report: None,
            status: None,
        }
    }

    /// The table a prediction would run on right now.
    fn current_input(&self) -> InputTable {
        match &self.uploaded {
            Some(upload) => upload.table.clone(),
            None => self.form.to_table(),
        }
    }

    /// One prediction attempt, triggered by the button.
    ///
    /// On success the result replaces the previous one; on failure the error
    /// is shown verbatim and the previous result is left untouched so the
    /// user can adjust inputs and try again.
    pub fn run_prediction(&mut self) {
        let Some(model) = &self.model else {
            return;
        };

        let input = self.current_input();
        let (aligned, report) = align(&input, &model.artifact.expected_features);

        match model.artifact.regressor.predict(&aligned) {
            Ok(raw) => {
                let rows = raw.len();
                self.prediction = Some(PredictionTable::new(aligned, raw));
                self.align_report = Some(report);
                self.status = Some(StatusMessage::Success(format!(
                    "Prediction successful ({rows} row{})",
                    if rows == 1 { "" } else { "s" }
                )));
            }
            Err(e) => {
                log::error!("Prediction failed: {e}");
                self.status = Some(StatusMessage::Error(format!("Error during prediction: {e}")));
            }
        }
    }

    /// Install a freshly loaded bulk CSV.
    pub fn set_upload(&mut self, upload: UploadedCsv) {
        log::info!(
            "Loaded {} rows from {} with columns {:?}",
            upload.table.len(),
            upload.file_name(),
            upload.table.columns
        );
        self.uploaded = Some(upload);
        self.status = None;
    }

    /// Drop the bulk CSV and fall back to the manual form.
    pub fn clear_upload(&mut self) {
        self.uploaded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_row_derives_date_features() {
        // 2024-01-15 is a Monday in ISO week 3.
        let form = FormInput {
            store_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            promo: true,
            state_holiday: false,
            school_holiday: false,
        };
        let table = form.to_table();

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row["Store"], CellValue::Integer(1));
        assert_eq!(row["DayOfWeek"], CellValue::Integer(0));
        assert_eq!(row["Promo"], CellValue::Integer(1));
        assert_eq!(row["Month"], CellValue::Integer(1));
        assert_eq!(row["Year"], CellValue::Integer(2024));
        assert_eq!(row["WeekOfYear"], CellValue::Integer(3));
        assert_eq!(row["StateHoliday"], CellValue::Integer(0));
        assert_eq!(row["SchoolHoliday"], CellValue::Integer(0));
    }

    #[test]
    fn sunday_is_day_six_and_weeks_wrap() {
        // 2023-01-01 is a Sunday belonging to ISO week 52 of 2022.
        let form = FormInput {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            ..FormInput::default()
        };
        let row = &form.to_table().rows[0];
        assert_eq!(row["DayOfWeek"], CellValue::Integer(6));
        assert_eq!(row["WeekOfYear"], CellValue::Integer(52));
        assert_eq!(row["Year"], CellValue::Integer(2023));
    }

    #[test]
    fn startup_without_models_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::startup(dir.path());
        assert!(state.model.is_none());
        assert!(state
            .fatal_error
            .as_deref()
            .unwrap()
            .contains("no model found"));

        // Nothing further runs without a model.
        state.run_prediction();
        assert!(state.prediction.is_none());
        assert!(state.status.is_none());
    }
}
