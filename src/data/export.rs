use std::path::Path;

use anyhow::{Context, Result};

use super::table::{PredictionTable, PREDICTION_COLUMN};

// ---------------------------------------------------------------------------
// CSV download
// ---------------------------------------------------------------------------

/// Suggested filename offered by the download dialog.
pub const DOWNLOAD_FILENAME: &str = "predicted_sales.csv";

/// Write the aligned columns plus the prediction column as UTF-8 CSV.
pub fn write_csv(path: &Path, table: &PredictionTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;

    let mut header: Vec<&str> = table.aligned.columns.iter().map(String::as_str).collect();
    header.push(PREDICTION_COLUMN);
    writer.write_record(&header).context("writing CSV header")?;

    for (row, predicted) in table.aligned.rows.iter().zip(&table.predicted) {
        let mut record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        record.push(predicted.to_string());
        writer.write_record(&record).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{AlignedTable, CellValue};

    #[test]
    fn writes_header_and_prediction_column() {
        let aligned = AlignedTable {
            columns: vec!["Store".into(), "Promo".into()],
            rows: vec![
                vec![CellValue::Integer(1), CellValue::Integer(0)],
                vec![CellValue::Integer(2), CellValue::Integer(1)],
            ],
        };
        let table = PredictionTable::new(aligned, vec![5400.2, 6100.8]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DOWNLOAD_FILENAME);
        write_csv(&path, &table).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Store,Promo,PredictedSales");
        assert_eq!(lines[1], "1,0,5400");
        assert_eq!(lines[2], "2,1,6101");
    }
}
