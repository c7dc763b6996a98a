//! JSON Export functionality
//!
//! Exports the expense list to JSON with schema versioning and summary
//! metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::aggregate;
use crate::error::ExpenseResult;
use crate::models::{Expense, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full expense export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Slot the expenses were read from
    pub slot: String,

    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    /// Sum of all amounts
    pub total: Money,

    /// Date range of expenses (earliest)
    pub earliest_expense: Option<String>,

    /// Date range of expenses (latest)
    pub latest_expense: Option<String>,
}

impl ExpenseExport {
    /// Create a new export from the expense list
    pub fn from_expenses(slot: &str, expenses: &[Expense]) -> Self {
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total: aggregate::total(expenses, None),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            slot: slot.to_string(),
            expenses: expenses.to_vec(),
            metadata,
        }
    }
}

/// Export the expense list to JSON
pub fn export_json<W: Write>(
    slot: &str,
    expenses: &[Expense],
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = ExpenseExport::from_expenses(slot, expenses);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| crate::error::ExpenseError::Export(e.to_string()))?;

    Ok(())
}
