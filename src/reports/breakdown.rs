//! Category breakdown report
//!
//! Spending per category for one month or for all time, ranked by amount,
//! with each category's share of the grand total.

use std::io::Write;

use crate::aggregate;
use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseCategory, Money, MonthPeriod};

/// One category row of the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub category: ExpenseCategory,
    pub total: Money,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of the grand total, in percent
    pub percentage: f64,
}

/// Category breakdown report
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    /// Month covered, `None` for all time
    pub period: Option<MonthPeriod>,
    /// Rows, highest total first
    pub rows: Vec<BreakdownRow>,
    pub grand_total: Money,
    pub expense_count: usize,
}

impl CategoryBreakdown {
    /// Build the breakdown over the given expenses
    pub fn generate(expenses: &[Expense], period: Option<MonthPeriod>) -> Self {
        let totals = aggregate::category_totals(expenses, period);
        let grand_total = totals.grand_total();

        let rows = totals
            .ranked()
            .into_iter()
            .map(|t| BreakdownRow {
                category: t.category,
                total: t.total,
                count: aggregate::filter_by_period(expenses, period)
                    .filter(|e| e.category == t.category)
                    .count(),
                percentage: t.total.percentage_of(grand_total),
            })
            .collect();

        Self {
            period,
            rows,
            grand_total,
            expense_count: aggregate::count(expenses, period),
        }
    }

    /// The highest-spending row, if any
    pub fn top(&self) -> Option<&BreakdownRow> {
        self.rows.first()
    }

    fn title(&self) -> String {
        match self.period {
            Some(period) => format!("Spending by Category: {}", period),
            None => "Spending by Category: all time".to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>14} {:>8} {:>7.1}%\n",
                row.category.to_string(),
                row.total.format_with_symbol(currency_symbol),
                row.count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "TOTAL",
            self.grand_total.format_with_symbol(currency_symbol),
            self.expense_count
        ));

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let period = self
            .period
            .map(|p| p.to_string())
            .unwrap_or_else(|| "all".to_string());

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Period", "Category", "Amount", "Count", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                period.clone(),
                row.category.key().to_string(),
                format!("{:.2}", row.total.as_units()),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.write_record([
            period,
            "TOTAL".to_string(),
            format!("{:.2}", self.grand_total.as_units()),
            self.expense_count.to_string(),
            if self.grand_total.is_zero() { "0.00" } else { "100.00" }.to_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
