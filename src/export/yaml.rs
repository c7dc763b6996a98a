//! YAML Export functionality
//!
//! Exports the expense list to YAML for a human-readable backup.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::export::json::ExpenseExport;
use crate::models::Expense;

/// Export the expense list to YAML
pub fn export_yaml<W: Write>(slot: &str, expenses: &[Expense], writer: &mut W) -> ExpenseResult<()> {
    let export = ExpenseExport::from_expenses(slot, expenses);

    writeln!(writer, "# Expense Tracker Export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
