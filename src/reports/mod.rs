//! Reports for the expense tracker
//!
//! Category breakdowns (the donut-chart data: ranked totals with shares of
//! the grand total) and per-day calendar views of a month.

pub mod breakdown;
pub mod calendar;

pub use breakdown::{BreakdownRow, CategoryBreakdown};
pub use calendar::ExpenseCalendar;
