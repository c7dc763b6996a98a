//! Export module for the expense tracker
//!
//! Provides data export functionality in multiple formats:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: machine-readable export with metadata
//! - YAML: human-readable export with metadata

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_expenses_csv;
pub use json::{export_json, ExpenseExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
