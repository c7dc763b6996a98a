//! Audit logging for the expense tracker
//!
//! Records every create, update and delete of an expense with before/after
//! values in an append-only, line-delimited JSON log.

mod entry;
mod logger;

pub use entry::{diff_expenses, AuditEntry, Operation};
pub use logger::AuditLogger;
