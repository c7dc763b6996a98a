//! Service layer for the expense tracker
//!
//! The service layer provides validation and lookup on top of the store,
//! handling input trimming and id-prefix resolution.

pub mod expense;

pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService};
