//! Report CLI commands

use clap::Subcommand;

use super::{date_range, CliContext};
use crate::error::FinanceResult;
use crate::models::{Period, RecordKind};
use crate::reports::{
    BudgetComparison, CategorySummary, ReportBuilder, ReportFormat, ReportKind, TrendReport,
    MAX_TREND_MONTHS,
};
use crate::services::{BudgetBook, Ledger};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expense totals per category
    Summary {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Income totals per category
    Income {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Spending against every budget of a period
    Budget {
        #[arg(short, long, default_value = "monthly")]
        period: Period,
    },
    /// Monthly spending over the last N months
    Trend {
        /// Number of months (default from settings)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_TREND_MONTHS)))]
        months: Option<u32>,
        /// Include income minus expenses per month
        #[arg(long)]
        net: bool,
    },
    /// Income minus expenses
    Balance {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Write a report file
    Generate {
        /// category_summary, income_summary, budget_comparison or trend_analysis
        kind: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Output format (default from settings)
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
    },
    /// Write the expense distribution chart
    Chart {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
}

/// Handle a report command for `user_id`
pub fn handle_report_command(ctx: &CliContext, user_id: &str, cmd: ReportCommands) -> FinanceResult<()> {
    let expenses = ctx.ledger(RecordKind::Expense, user_id)?;
    let income = ctx.ledger(RecordKind::Income, user_id)?;
    let budgets = ctx.budgets(user_id)?;
    let symbol = ctx.symbol();

    match cmd {
        ReportCommands::Summary { start, end } => {
            let summary = CategorySummary::generate(&expenses, &date_range(start, end)?);
            print!("{}", summary.format_terminal("Expense Summary", symbol));
        }

        ReportCommands::Income { start, end } => {
            let summary = CategorySummary::generate(&income, &date_range(start, end)?);
            print!("{}", summary.format_terminal("Income Summary", symbol));
        }

        ReportCommands::Budget { period } => {
            let comparison = BudgetComparison::generate(&budgets, period);
            print!("{}", comparison.format_terminal(period, symbol));
        }

        ReportCommands::Trend { months, net } => {
            let months = months.unwrap_or(ctx.settings.trend_months);
            let today = chrono::Local::now().date_naive();
            let report = TrendReport::generate(&expenses, net.then_some(&income), months, today)?;
            print!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Balance { start, end } => {
            let range = date_range(start, end)?;
            let earned = income.total(&range);
            let spent = expenses.total(&range);
            println!("Balance for {} ({})", user_id, range.label());
            println!("Income:   {:>12}", earned.format_with_symbol(symbol));
            println!("Expenses: {:>12}", spent.format_with_symbol(symbol));
            println!(
                "Net:      {:>12}",
                expenses.net_balance(&income, &range).format_with_symbol(symbol)
            );
        }

        ReportCommands::Generate {
            kind,
            start,
            end,
            format,
        } => {
            let kind: ReportKind = kind.parse()?;
            let path = builder(ctx, &expenses, &income, &budgets, user_id)
                .with_format(format.unwrap_or(ctx.settings.report_format))
                .generate(kind, &date_range(start, end)?)?;
            println!("Report written to {}", path.display());
        }

        ReportCommands::Chart { start, end } => {
            let path = builder(ctx, &expenses, &income, &budgets, user_id)
                .plot_category_distribution(&date_range(start, end)?)?;
            println!("Chart written to {}", path.display());
        }
    }

    Ok(())
}

fn builder<'a>(
    ctx: &CliContext,
    expenses: &'a Ledger,
    income: &'a Ledger,
    budgets: &'a BudgetBook,
    user_id: &str,
) -> ReportBuilder<'a> {
    ReportBuilder::new(expenses, income, budgets, ctx.paths.reports_dir(user_id))
        .with_trend_months(ctx.settings.trend_months)
        .with_currency_symbol(ctx.settings.currency_symbol.clone())
}
