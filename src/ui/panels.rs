use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, StatusMessage, UploadedCsv};

// ---------------------------------------------------------------------------
// Left side panel – input form and bulk upload
// ---------------------------------------------------------------------------

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.separator();

    if state.model.is_none() {
        ui.label("No model loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let bulk_active = state.uploaded.is_some();

            // ---- Manual form (ignored while a bulk CSV is active) ----
            ui.add_enabled_ui(!bulk_active, |ui: &mut Ui| {
                ui.strong("Store ID");
                ui.add(
                    egui::DragValue::new(&mut state.form.store_id)
                        .range(1..=u32::MAX)
                        .speed(1),
                );
                ui.add_space(4.0);

                ui.strong("Date");
                ui.add(egui_extras::DatePickerButton::new(&mut state.form.date));
                ui.add_space(4.0);

                ui.checkbox(&mut state.form.promo, "Promo running");
                ui.checkbox(&mut state.form.state_holiday, "State holiday");
                ui.checkbox(&mut state.form.school_holiday, "School holiday");
            });

            ui.separator();

            // ---- Bulk CSV upload ----
            ui.strong("Bulk prediction");
            if ui.button("Upload CSV…").clicked() {
                open_csv_dialog(state);
            }
            if let Some(upload) = &state.uploaded {
                ui.label(format!(
                    "{} ({} rows)",
                    upload.file_name(),
                    upload.table.len()
                ));
                if ui.small_button("Use form instead").clicked() {
                    state.clear_upload();
                }
            }

            ui.separator();

            if ui
                .button(RichText::new("Predict Sales").strong())
                .clicked()
            {
                state.run_prediction();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: loaded-model banner and status messages.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Sales Predictor");
        ui.separator();

        match &state.model {
            Some(model) => {
                ui.label(
                    RichText::new(format!("Loaded model: {}", model.file_name()))
                        .color(Color32::DARK_GREEN),
                );
            }
            None => {
                let msg = state
                    .fatal_error
                    .as_deref()
                    .unwrap_or("no model found");
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        }

        if let Some(status) = &state.status {
            ui.separator();
            match status {
                StatusMessage::Success(msg) => {
                    ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
                }
                StatusMessage::Error(msg) => {
                    ui.label(RichText::new(msg).color(Color32::RED));
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn open_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload CSV for bulk prediction")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv(&path) {
            Ok(table) => {
                state.set_upload(UploadedCsv { path, table });
            }
            Err(e) => {
                log::error!("Failed to load CSV: {e:#}");
                state.status = Some(StatusMessage::Error(format!("Error: {e:#}")));
            }
        }
    }
}
