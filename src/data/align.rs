use super::table::{AlignedTable, CellValue, InputTable};

// ---------------------------------------------------------------------------
// Feature alignment: arbitrary input columns → the model's expected schema
// ---------------------------------------------------------------------------

/// What alignment changed, so the UI can surface it instead of silently
/// substituting values. Zero-fill cannot distinguish "user didn't provide"
/// from "legitimately zero", which matters for any feature where zero is not
/// a neutral default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignReport {
    /// Expected columns absent from the input, filled with zeros.
    pub filled: Vec<String>,
    /// Input columns not in the expected list, dropped from the output.
    pub dropped: Vec<String>,
}

impl AlignReport {
    /// True when the input already matched the expected schema exactly.
    pub fn is_clean(&self) -> bool {
        self.filled.is_empty() && self.dropped.is_empty()
    }
}

/// Reshape `table` to exactly `expected` columns, in that order.
///
/// Missing columns are inserted as zeros; extra columns are dropped. Total:
/// never fails, even when the input has none of the expected columns (the
/// result is then all-zero with the same row count).
pub fn align(table: &InputTable, expected: &[String]) -> (AlignedTable, AlignReport) {
    let filled: Vec<String> = expected
        .iter()
        .filter(|col| !table.columns.contains(col))
        .cloned()
        .collect();
    let dropped: Vec<String> = table
        .columns
        .iter()
        .filter(|col| !expected.contains(col))
        .cloned()
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            expected
                .iter()
                .map(|col| row.get(col).cloned().unwrap_or(CellValue::Integer(0)))
                .collect()
        })
        .collect();

    let aligned = AlignedTable {
        columns: expected.to_vec(),
        rows,
    };
    (aligned, AlignReport { filled, dropped })
}
