use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::table::{CellValue, InputTable};

// ---------------------------------------------------------------------------
// CSV upload
// ---------------------------------------------------------------------------

/// Load an uploaded CSV into an [`InputTable`].
///
/// The header row supplies the column names; the column set is unconstrained
/// and is only reconciled with the model's schema at alignment time. Cell
/// types are guessed per value (int → float → text, empty → null).
pub fn load_csv(path: &Path) -> Result<InputTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut row = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                continue;
            };
            row.insert(col_name.clone(), CellValue::parse(value));
        }
        rows.push(row);
    }

    Ok(InputTable {
        columns: headers,
        rows,
    })
}
