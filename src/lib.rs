//! Expense Tracker - record daily expenses and see where the money goes
//!
//! This library provides the core functionality for the `expenses` command:
//! a persisted list of dated, categorized expenses and the aggregates derived
//! from it (category totals and rankings, monthly totals, per-day views).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money, months)
//! - `storage`: Slot storage and the expense persistence adapter
//! - `store`: The in-memory expense list, persisted after every mutation
//! - `aggregate`: Totals, rankings and filtered subsets
//! - `services`: Validation and lookup on top of the store
//! - `reports`: Category breakdown and calendar reports
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::storage::FileSlotStore;
//! use expense_tracker::store::ExpenseStore;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = ExpenseStore::open(
//!     Box::new(FileSlotStore::new(paths.data_dir())),
//!     settings.storage_key.clone(),
//! );
//! let totals = expense_tracker::aggregate::category_totals(store.expenses(), None);
//! ```

pub mod aggregate;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod store;

pub use error::{ExpenseError, ExpenseResult};
