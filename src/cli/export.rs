//! CLI command for data export
//!
//! Writes the expense list as JSON, CSV or YAML to a file or stdout.

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{csv, json, yaml};
use crate::store::ExpenseStore;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per expense)
    Csv,
    /// JSON format (expenses plus metadata)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Arguments of the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path, stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(store: &ExpenseStore, args: ExportArgs) -> ExpenseResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(store, args.format, args.pretty, &mut writer)?;
            writer.flush()?;
            println!(
                "Exported {} expenses to: {}",
                store.count(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(store, args.format, args.pretty, &mut writer)?;
            if matches!(args.format, ExportFormat::Json) {
                writeln!(writer)?;
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    store: &ExpenseStore,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => csv::export_expenses_csv(store.expenses(), writer),
        ExportFormat::Json => json::export_json(store.slot(), store.expenses(), writer, pretty),
        ExportFormat::Yaml => yaml::export_yaml(store.slot(), store.expenses(), writer),
    }
}
