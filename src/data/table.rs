use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in an input column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what an unconstrained CSV can
/// carry. Uploaded files have no guaranteed schema, so every column starts
/// life as a bag of these.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for prediction.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Guess the type of a raw CSV cell: int, then float, then text.
    pub fn parse(s: &str) -> CellValue {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// InputTable – rows with arbitrary, unvalidated columns
// ---------------------------------------------------------------------------

/// An input table as the user supplied it: the manual form (one row) or an
/// uploaded CSV (many rows). Column names are arbitrary; extra or missing
/// columns are resolved later by [`crate::data::align::align`].
#[derive(Debug, Clone)]
pub struct InputTable {
    /// Column names in their source order.
    pub columns: Vec<String>,
    /// One map per row: column_name → value.
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl InputTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AlignedTable – exactly the model's expected columns, in order
// ---------------------------------------------------------------------------

/// An input table reshaped to an artifact's expected feature schema.
/// Invariant: every row has exactly `columns.len()` cells and `columns`
/// equals the expected feature list it was aligned against.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl AlignedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PredictionTable – aligned input plus the predicted column
// ---------------------------------------------------------------------------

/// Header of the appended prediction column.
pub const PREDICTION_COLUMN: &str = "PredictedSales";

/// The aligned input with one integer-rounded prediction per row.
#[derive(Debug, Clone)]
pub struct PredictionTable {
    pub aligned: AlignedTable,
    /// Same length as `aligned.rows`.
    pub predicted: Vec<i64>,
}

impl PredictionTable {
    /// Round raw model outputs and attach them to the aligned table.
    pub fn new(aligned: AlignedTable, raw: Vec<f64>) -> Self {
        let predicted = raw.into_iter().map(|v| v.round() as i64).collect();
        PredictionTable { aligned, predicted }
    }

    pub fn len(&self) -> usize {
        self.aligned.len()
    }
}
