//! Expense CLI commands
//!
//! Implements CLI commands for recording, browsing, editing and deleting
//! expenses.

use clap::Subcommand;

use super::args::{parse_amount, parse_category, parse_date, parse_month, today};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table, DisplayOptions};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseUpdate;
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::store::ExpenseStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50")
        amount: String,
        /// Category (daily, food, transportation, recreation)
        category: String,
        /// What the money was spent on
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses
    List {
        /// Only expenses on this day (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "month")]
        date: Option<String>,
        /// Only expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID (or unique prefix)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (or unique prefix)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
    /// Delete one or more expenses
    Delete {
        /// Expense IDs (or unique prefixes)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Delete every expense
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut ExpenseStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let options = DisplayOptions::from_settings(settings);
    let mut service = ExpenseService::new(store);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let input = CreateExpenseInput {
                date: match date {
                    Some(d) => parse_date(&d)?,
                    None => today(),
                },
                category: parse_category(&category)?,
                amount: parse_amount(&amount)?,
                description: description.join(" "),
            };

            let expense = service.create(input)?;

            println!("Recorded expense:");
            println!("  ID:          {}", expense.id);
            println!("  Date:        {}", options.format_date(expense.date));
            println!("  Category:    {}", expense.category);
            println!(
                "  Amount:      {}",
                expense.amount.format_with_symbol(&options.currency_symbol)
            );
            println!("  Description: {}", expense.description);
        }

        ExpenseCommands::List {
            date,
            month,
            category,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(d) = date {
                filter = filter.date(parse_date(&d)?);
            }
            if let Some(m) = month {
                filter = filter.period(parse_month(&m)?);
            }
            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }
            if let Some(l) = limit {
                filter = filter.limit(l);
            }

            let expenses = service.list(&filter);
            print!("{}", format_expense_table(&expenses, &options));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.resolve(&id)?;
            print!("{}", format_expense_details(&expense, &options));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
        } => {
            let expense = service.resolve(&id)?;

            let mut update = ExpenseUpdate::new();
            if let Some(a) = amount {
                update = update.amount(parse_amount(&a)?);
            }
            if let Some(c) = category {
                update = update.category(parse_category(&c)?);
            }
            if let Some(d) = date {
                update = update.date(parse_date(&d)?);
            }
            if let Some(d) = description {
                update = update.description(d);
            }

            if update.is_empty() {
                return Err(ExpenseError::Validation(
                    "Nothing to change. Use --amount, --category, --date or --description".into(),
                ));
            }

            let updated = service.edit(&expense.id, update)?;
            println!("Updated expense: {}", updated.id);
            print!("{}", format_expense_details(&updated, &options));
        }

        ExpenseCommands::Delete { ids } => {
            let mut targets = Vec::with_capacity(ids.len());
            for id in &ids {
                targets.push(service.resolve(id)?.id);
            }

            let removed = service.remove(&targets);
            println!(
                "Deleted {} expense{}",
                removed,
                if removed == 1 { "" } else { "s" }
            );
        }

        ExpenseCommands::Clear { force } => {
            if !force {
                let count = service.list(&ExpenseFilter::new()).len();
                println!("About to delete all {} expenses.", count);
                println!("Use --force to confirm");
                return Ok(());
            }

            let removed = service.clear();
            println!("Cleared {} expenses", removed);
        }
    }

    Ok(())
}
