//! Calendar view of a month's spending
//!
//! Per-day totals for one month, plus a weekday grid marking the days on
//! which something was spent.

use chrono::{Datelike, NaiveDate};

use crate::aggregate::{self, DayTotal};
use crate::models::{Expense, Money, MonthPeriod};

/// Per-day spending for a month
#[derive(Debug, Clone)]
pub struct ExpenseCalendar {
    pub period: MonthPeriod,
    /// Days with at least one expense, in date order
    pub days: Vec<DayTotal>,
    pub total: Money,
}

impl ExpenseCalendar {
    pub fn generate(expenses: &[Expense], period: MonthPeriod) -> Self {
        let days = aggregate::daily_totals(expenses, period);
        let total = days.iter().map(|d| d.total).sum();
        Self {
            period,
            days,
            total,
        }
    }

    /// Totals for a specific day, if anything was spent on it
    pub fn day(&self, date: NaiveDate) -> Option<&DayTotal> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Day with the highest total; the earliest wins a tie
    pub fn busiest_day(&self) -> Option<&DayTotal> {
        self.days
            .iter()
            .fold(None, |best: Option<&DayTotal>, day| match best {
                Some(b) if b.total >= day.total => Some(b),
                _ => Some(day),
            })
    }

    /// Format the calendar for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Expenses: {}\n", self.period));
        output.push_str(&"=".repeat(34));
        output.push('\n');
        output.push_str(&self.format_grid());
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        for day in &self.days {
            output.push_str(&format!(
                "{} {:>14} {:>4} item{}\n",
                day.date.format("%a %d"),
                day.total.format_with_symbol(currency_symbol),
                day.count,
                if day.count == 1 { "" } else { "s" }
            ));
        }

        output.push_str(&"-".repeat(34));
        output.push('\n');
        output.push_str(&format!(
            "{:<6} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Monday-first month grid; days with spending are starred
    fn format_grid(&self) -> String {
        let mut grid = String::from(" Mo  Tu  We  Th  Fr  Sa  Su\n");

        let start = self.period.start_date();
        let end = self.period.end_date();
        let offset = start.weekday().num_days_from_monday() as usize;
        grid.push_str(&"    ".repeat(offset));

        let mut column = offset;
        for date in start.iter_days().take_while(|d| *d <= end) {
            let marker = if self.day(date).is_some() { '*' } else { ' ' };
            grid.push_str(&format!("{:>3}{}", date.day(), marker));
            column += 1;
            if column == 7 {
                grid.push('\n');
                column = 0;
            }
        }
        if column != 0 {
            grid.push('\n');
        }

        grid
    }
}
