//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain:
//! expenses, their categories and ids, money amounts and month periods.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use category::ExpenseCategory;
pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError, MAX_AMOUNT, MAX_DESCRIPTION_LEN};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodParseError};
