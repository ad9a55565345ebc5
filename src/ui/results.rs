use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::{self, DOWNLOAD_FILENAME};
use crate::state::{AppState, StatusMessage};

// ---------------------------------------------------------------------------
// Central panel – prediction results
// ---------------------------------------------------------------------------

/// Render the prediction table, the alignment notes, and the download button.
pub fn results_panel(ui: &mut Ui, state: &mut AppState) {
    // Clone so we can mutate state (status message) while rendering.
    let Some(prediction) = state.prediction.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Fill in the form (or upload a CSV) and press Predict Sales");
        });
        return;
    };

    // ---- Alignment notes ----
    if let Some(report) = &state.align_report {
        if !report.filled.is_empty() {
            ui.label(
                RichText::new(format!(
                    "Missing columns filled with 0: {}",
                    report.filled.join(", ")
                ))
                .italics(),
            );
        }
        if !report.dropped.is_empty() {
            ui.label(
                RichText::new(format!(
                    "Ignored extra columns: {}",
                    report.dropped.join(", ")
                ))
                .italics(),
            );
        }
        if !report.is_clean() {
            ui.add_space(4.0);
        }
    }

    // ---- Result table ----
    let n_cols = prediction.aligned.columns.len() + 1;
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), n_cols)
        .header(20.0, |mut header| {
            for col in &prediction.aligned.columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
            header.col(|ui| {
                ui.strong(crate::data::table::PREDICTION_COLUMN);
            });
        })
        .body(|mut body| {
            for (row, predicted) in prediction.aligned.rows.iter().zip(&prediction.predicted) {
                body.row(18.0, |mut table_row| {
                    for cell in row {
                        table_row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                    table_row.col(|ui| {
                        ui.label(RichText::new(predicted.to_string()).strong());
                    });
                });
            }
        });

    ui.add_space(8.0);

    // ---- Download ----
    if ui.button("Download predictions").clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Save predictions")
            .set_file_name(DOWNLOAD_FILENAME)
            .add_filter("CSV", &["csv"])
            .save_file()
        {
            match export::write_csv(&path, &prediction) {
                Ok(()) => {
                    log::info!("Wrote {} predictions to {}", prediction.len(), path.display());
                    state.status = Some(StatusMessage::Success(format!(
                        "Saved {}",
                        path.display()
                    )));
                }
                Err(e) => {
                    log::error!("Failed to write CSV: {e:#}");
                    state.status = Some(StatusMessage::Error(format!("Error: {e:#}")));
                }
            }
        }
    }
}
