/// Data layer: table types, alignment, and CSV I/O.
///
/// Pipeline:
/// ```text
///   form / uploaded .csv
///          │
///          ▼
///     ┌──────────┐
///     │  loader   │  parse file → InputTable (arbitrary columns)
///     └──────────┘
///          │
///          ▼
///     ┌──────────┐
///     │  align    │  zero-fill missing, project to expected → AlignedTable
///     └──────────┘
///          │ predict
///          ▼
///     ┌──────────┐
///     │  export   │  AlignedTable + PredictedSales → .csv
///     └──────────┘
/// ```
pub mod align;
pub mod export;
pub mod loader;
pub mod table;
