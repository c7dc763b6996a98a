use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{
    handle_expense_command, handle_export_command, handle_report_command, ExpenseCommands,
    ExportArgs, ReportCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::FileSlotStore;
use expense_tracker::store::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track daily expenses by category from the command line",
    long_about = "Record dated, categorized expenses and see where the money goes: \
                  per-category breakdowns, monthly totals and per-day calendar views."
)]
struct Cli {
    /// Storage slot to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_TRACKER_SLOT")]
    slot: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Export all expenses
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let slot = cli.slot.unwrap_or_else(|| settings.storage_key.clone());
    let slots = FileSlotStore::new(paths.data_dir());

    let Some(command) = cli.command else {
        println!("expenses - track daily expenses by category");
        println!();
        println!("Run 'expenses --help' for usage information.");
        println!("Run 'expenses add 12.50 food Lunch' to record your first expense.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("Expense Tracker Configuration");
        println!("=============================");
        println!("Base directory:  {}", paths.base_dir().display());
        println!("Data directory:  {}", paths.data_dir().display());
        println!("Settings file:   {}", paths.settings_file().display());
        println!("Audit log:       {}", paths.audit_log().display());
        println!("Slot file:       {}", slots.slot_path(&slot)?.display());
        println!();
        println!("Settings:");
        println!("  Storage slot:    {}", slot);
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Date format:     {}", settings.date_format);
        println!("  Audit enabled:   {}", settings.audit_enabled);
        return Ok(());
    }

    // Reject bad slot names before anything touches the disk
    slots.slot_path(&slot)?;

    let mut store = ExpenseStore::open(Box::new(slots), slot);
    if settings.audit_enabled {
        store = store.with_audit(AuditLogger::new(paths.audit_log()));
    }

    match command {
        Commands::Expense(cmd) => handle_expense_command(&mut store, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&store, &settings, &paths, cmd)?,
        Commands::Export(args) => handle_export_command(&store, args)?,
        Commands::Config => {}
    }

    if store.is_dirty() {
        eprintln!(
            "Warning: changes could not be saved to slot '{}'; see the log for details",
            store.slot()
        );
    }

    Ok(())
}
