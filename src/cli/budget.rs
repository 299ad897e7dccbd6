//! Budget CLI commands

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use super::{parse_amount, CliContext};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetStatus, BudgetUpdate, Period};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set (or replace) a budget; replacing resets its spending
    Set {
        category: String,
        /// Budget amount, e.g. 500
        amount: String,
        /// daily, weekly, monthly or yearly (default from settings)
        #[arg(short, long)]
        period: Option<Period>,
        /// Fraction of the budget at which to alert (0-1)
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Report spending against a budget
    Spend {
        category: String,
        amount: String,
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Show a budget's status
    Status {
        category: String,
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Reset a budget's spending to zero
    Reset {
        category: String,
        #[arg(short, long)]
        period: Option<Period>,
    },
    /// Change a budget's amount or alert threshold
    Update {
        category: String,
        #[arg(short, long)]
        period: Option<Period>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// List all budgets
    List,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Alert At")]
    alert_at: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Handle a budget command for `user_id`
pub fn handle_budget_command(ctx: &CliContext, user_id: &str, cmd: BudgetCommands) -> FinanceResult<()> {
    let mut book = ctx.budgets(user_id)?;
    let symbol = ctx.symbol();
    let default_period = ctx.settings.default_period;

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            period,
            threshold,
        } => {
            let key = book.set(
                &category,
                parse_amount(&amount)?,
                period.unwrap_or(default_period),
                threshold.unwrap_or(ctx.settings.default_alert_threshold),
            )?;
            println!("Budget set: {}", key);
        }

        BudgetCommands::Spend {
            category,
            amount,
            period,
        } => {
            let period = period.unwrap_or(default_period);
            book.add_spending(&category, parse_amount(&amount)?, period)?;
            if let Some(status) = book.status(&category, period) {
                print_status(&status, symbol);
            }
        }

        BudgetCommands::Status { category, period } => {
            let period = period.unwrap_or(default_period);
            let status = book
                .status(&category, period)
                .ok_or_else(|| missing(&category, period))?;
            print_status(&status, symbol);
        }

        BudgetCommands::Reset { category, period } => {
            let period = period.unwrap_or(default_period);
            if !book.reset(&category, period)? {
                return Err(missing(&category, period));
            }
            println!("Budget reset: {}_{}", category.trim(), period);
        }

        BudgetCommands::Update {
            category,
            period,
            amount,
            threshold,
        } => {
            let period = period.unwrap_or(default_period);
            let update = BudgetUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                alert_threshold: threshold,
            };
            if !book.update(&category, period, update)? {
                return Err(missing(&category, period));
            }
            println!("Budget updated: {}_{}", category.trim(), period);
        }

        BudgetCommands::List => {
            let budgets = book.list_all();
            if budgets.is_empty() {
                println!("No budgets set.");
                return Ok(());
            }

            let rows: Vec<BudgetRow> = budgets
                .iter()
                .map(|b| {
                    let status = b.status();
                    BudgetRow {
                        category: status.category.clone(),
                        period: status.period.to_string(),
                        budget: status.budget.format_with_symbol(symbol),
                        spent: status.spent.format_with_symbol(symbol),
                        remaining: status.remaining.format_with_symbol(symbol),
                        alert_at: format!("{:.0}%", b.alert_threshold * 100.0),
                        status: status_label(&status),
                    }
                })
                .collect();

            let mut table = Table::new(rows);
            table.with(Style::psql());
            println!("{}", table);
        }
    }

    Ok(())
}

fn missing(category: &str, period: Period) -> FinanceError {
    FinanceError::budget_not_found(format!("{}_{}", category.trim(), period))
}

fn status_label(status: &BudgetStatus) -> &'static str {
    if status.over_budget {
        "OVER"
    } else if status.alert_triggered {
        "ALERT"
    } else {
        "ok"
    }
}

fn print_status(status: &BudgetStatus, symbol: &str) {
    println!("Budget:    {} ({})", status.category, status.period);
    println!("Amount:    {}", status.budget.format_with_symbol(symbol));
    println!("Spent:     {}", status.spent.format_with_symbol(symbol));
    println!("Remaining: {}", status.remaining.format_with_symbol(symbol));
    if status.over_budget {
        println!("Status:    over budget");
    } else if status.alert_triggered {
        println!("Status:    alert threshold reached");
    } else {
        println!("Status:    ok");
    }
}
