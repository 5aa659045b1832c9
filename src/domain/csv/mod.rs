// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV ingestion
// No I/O, no async, no external dependencies

mod csv_row;

pub use csv_row::{coerce_numeric, CellValue, CsvField, CsvRow};
