//! CSV Export functionality
//!
//! Exports the expense list to CSV, one row per expense.

use std::io::Write;

use crate::error::ExpenseResult;
use crate::models::Expense;

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Category", "Amount", "Description"])?;

    for expense in expenses {
        let date = expense.date.format("%Y-%m-%d").to_string();
        let amount = format!("{:.2}", expense.amount.as_units());
        csv.write_record([
            expense.id.as_str(),
            date.as_str(),
            expense.category.key(),
            amount.as_str(),
            expense.description.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_csv_export() {
        let mut expense = Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ExpenseCategory::Recreation,
            Money::from_cents(2000),
            "Cinema, with \"friends\"",
        );
        expense.id = ExpenseId::from("e1");

        let mut buffer = Vec::new();
        export_expenses_csv(&[expense], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "ID,Date,Category,Amount,Description");
        assert_eq!(
            lines[1],
            "e1,2025-01-15,recreation,20.00,\"Cinema, with \"\"friends\"\"\""
        );
    }

    #[test]
    fn test_empty_csv_has_header() {
        let mut buffer = Vec::new();
        export_expenses_csv(&[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ID,Date,Category,Amount,Description\n"
        );
    }
}
