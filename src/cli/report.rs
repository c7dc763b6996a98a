//! CLI commands for reports
//!
//! Category summaries, the per-day calendar view and the audit history.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::args::parse_month;
use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::MonthPeriod;
use crate::reports::{CategoryBreakdown, ExpenseCalendar};
use crate::store::ExpenseStore;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending per category, ranked, with each category's share
    Summary {
        /// Month to summarize (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// Summarize every expense regardless of date
        #[arg(short, long)]
        all: bool,
        /// Write the summary as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Per-day totals for a month
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a report command
pub fn handle_report_command(
    store: &ExpenseStore,
    settings: &Settings,
    paths: &ExpensePaths,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Summary { month, all, output } => {
            let period = if all {
                None
            } else {
                Some(month_or_current(month)?)
            };
            handle_summary(store, settings, period, output)
        }
        ReportCommands::Calendar { month } => {
            let period = month_or_current(month)?;
            let calendar = ExpenseCalendar::generate(store.expenses(), period);
            print!("{}", calendar.format_terminal(&settings.currency_symbol));
            Ok(())
        }
        ReportCommands::History { limit } => handle_history(paths, store.slot(), limit),
    }
}

fn month_or_current(month: Option<String>) -> ExpenseResult<MonthPeriod> {
    match month {
        Some(m) => parse_month(&m),
        None => Ok(MonthPeriod::current()),
    }
}

fn handle_summary(
    store: &ExpenseStore,
    settings: &Settings,
    period: Option<MonthPeriod>,
    output: Option<PathBuf>,
) -> ExpenseResult<()> {
    let report = CategoryBreakdown::generate(store.expenses(), period);

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Summary exported to: {}", path.display());
        return Ok(());
    }

    print!("{}", report.format_terminal(&settings.currency_symbol));
    if let Some(top) = report.top() {
        println!(
            "\nTop category: {} ({}, {:.1}%)",
            top.category,
            top.total.format_with_symbol(&settings.currency_symbol),
            top.percentage
        );
    }

    Ok(())
}

fn handle_history(paths: &ExpensePaths, slot: &str, limit: usize) -> ExpenseResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    if !logger.exists() {
        println!("No history recorded yet.");
        return Ok(());
    }

    let entries = logger.read_recent_for_slot(slot, limit)?;
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
