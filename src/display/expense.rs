//! Expense display formatting
//!
//! Provides utilities for formatting expenses for terminal display,
//! including the register table and single-expense details.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Expense, Money};

/// Maximum description width in the register table
const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Formatting options shared by the display functions
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    /// strftime format for dates
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    /// Render a date with `date_format`, falling back to ISO 8601 when the
    /// format asks for fields a plain date doesn't have
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut rendered = String::new();
        match write!(rendered, "{}", date.format(&self.date_format)) {
            Ok(()) => rendered,
            Err(_) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Format a list of expenses as a table, with a total line underneath
pub fn format_expense_table(expenses: &[Expense], options: &DisplayOptions) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short().to_string(),
        date: options.format_date(e.date),
        category: e.category.to_string(),
        amount: e.amount.format_with_symbol(&options.currency_symbol),
        description: truncate(&e.description, DESCRIPTION_WIDTH),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n{} expense{}, total {}\n",
        table,
        expenses.len(),
        if expenses.len() == 1 { "" } else { "s" },
        total.format_with_symbol(&options.currency_symbol)
    )
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", options.format_date(expense.date)));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(&options.currency_symbol)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseId};
    use chrono::NaiveDate;

    fn sample() -> Expense {
        let mut e = Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ExpenseCategory::Food,
            Money::from_cents(1250),
            "Lunch",
        );
        e.id = ExpenseId::from("0123456789abcdef");
        e
    }

    #[test]
    fn test_table() {
        let output = format_expense_table(&[sample(), sample()], &DisplayOptions::default());

        assert!(output.contains("Description"));
        assert!(output.contains("01234567"));
        assert!(!output.contains("0123456789"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("2 expenses, total $25.00"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], &DisplayOptions::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_details_use_options() {
        let options = DisplayOptions {
            currency_symbol: "€".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        };
        let output = format_expense_details(&sample(), &options);

        assert!(output.contains("Expense:     0123456789abcdef"));
        assert!(output.contains("Date:        15/01/2024"));
        assert!(output.contains("Amount:      €12.50"));
        assert!(output.contains("Category:    Food"));
    }

    #[test]
    fn test_time_format_falls_back_to_iso() {
        let options = DisplayOptions {
            date_format: "%Y-%m-%d %H:%M".to_string(),
            ..DisplayOptions::default()
        };

        let table = format_expense_table(&[sample()], &options);
        assert!(table.contains("2024-01-15"));
        let details = format_expense_details(&sample(), &options);
        assert!(details.contains("Date:        2024-01-15\n"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 10), "a very ...");
        assert_eq!(truncate("ééééééééééé", 10).chars().count(), 10);
    }
}
