use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::table::AlignedTable;

// ---------------------------------------------------------------------------
// Regressor – the trained model inside an artifact
// ---------------------------------------------------------------------------

/// Why a prediction attempt failed. Surfaced verbatim in the UI; the form
/// stays usable for another attempt.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("model expects {expected} features but input has {actual} columns")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("column '{column}', row {row}: '{value}' is not numeric")]
    NonNumericCell {
        column: String,
        row: usize,
        value: String,
    },
}

/// A trained linear regressor: one coefficient per expected feature plus an
/// intercept. The application treats it as opaque beyond [`Regressor::predict`];
/// training happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regressor {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl Regressor {
    /// Predict one value per row of an aligned table.
    ///
    /// Fails on a coefficient/column count mismatch or on any cell that is
    /// not numeric; the caller decides how to report it.
    pub fn predict(&self, table: &AlignedTable) -> Result<Vec<f64>, PredictError> {
        if self.coefficients.len() != table.columns.len() {
            return Err(PredictError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: table.columns.len(),
            });
        }

        let mut out = Vec::with_capacity(table.len());
        for (row_no, row) in table.rows.iter().enumerate() {
            let mut acc = self.intercept;
            for (col_idx, cell) in row.iter().enumerate() {
                let value = cell.as_f64().ok_or_else(|| PredictError::NonNumericCell {
                    column: table.columns[col_idx].clone(),
                    row: row_no,
                    value: cell.to_string(),
                })?;
                acc += self.coefficients[col_idx] * value;
            }
            out.push(acc);
        }
        Ok(out)
    }
}
