//! Expense and income CLI commands
//!
//! Both ledgers share one command set; the `RecordKind` picks the ledger.

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use super::{date_range, parse_amount, CliContext};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewRecord, Period, Record, RecordKind, RecordUpdate};
use crate::services::Ledger;

/// Record subcommands
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a record
    Add {
        /// Amount, e.g. 12.50
        amount: String,
        category: String,
        description: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Mark as recurring with this period
        #[arg(short, long)]
        recurring: Option<Period>,
    },
    /// List records
    List {
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Only records with this tag
        #[arg(long)]
        tag: Option<String>,
        /// Start date (YYYY-MM-DD); filters only together with --end
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Number of records to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Show one record
    Show {
        /// Record ID (full or rec-xxxxxxxx)
        id: String,
    },
    /// Delete a record
    Delete {
        /// Record ID (full or rec-xxxxxxxx)
        id: String,
    },
    /// Update fields of a record
    Update {
        /// Record ID (full or rec-xxxxxxxx)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Replace the tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Total amount, optionally over a date range
    Total {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// List recurring records
    Recurring,
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl RecordRow {
    fn new(record: &Record, symbol: &str) -> Self {
        let mut tags = record.tags.join(", ");
        if let Some(period) = record.recurrence_period {
            if !tags.is_empty() {
                tags.push(' ');
            }
            tags.push_str(&format!("[{}]", period));
        }
        Self {
            id: record.id.short(),
            date: record.date.clone(),
            category: record.category.clone(),
            description: record.description.clone(),
            amount: record.amount.format_with_symbol(symbol),
            tags,
        }
    }
}

/// Handle an expense or income command for `user_id`
pub fn handle_record_command(
    ctx: &CliContext,
    kind: RecordKind,
    user_id: &str,
    cmd: RecordCommands,
) -> FinanceResult<()> {
    let mut ledger = ctx.ledger(kind, user_id)?;
    let symbol = ctx.symbol();

    match cmd {
        RecordCommands::Add {
            amount,
            category,
            description,
            date,
            tags,
            recurring,
        } => {
            let mut new = NewRecord::new(parse_amount(&amount)?, category, description).tagged(tags);
            if let Some(date) = date {
                new = new.on(date);
            }
            if let Some(period) = recurring {
                new = new.recurring(period);
            }

            let id = ledger.add(new)?;
            println!("{} added: {} ({})", kind, id.short(), id);
        }

        RecordCommands::List {
            category,
            tag,
            start,
            end,
            limit,
        } => {
            let range = date_range(start, end)?;
            let records: Vec<&Record> = ledger
                .list_in(&range)
                .into_iter()
                .filter(|r| category.as_deref().map_or(true, |c| r.in_category(c)))
                .filter(|r| tag.as_deref().map_or(true, |t| r.has_tag(t)))
                .collect();

            print_records(kind, &records, limit, symbol);
        }

        RecordCommands::Show { id } => {
            let record = find(&ledger, &id)?;

            println!("{}: {}", kind, record.description);
            println!("ID:        {}", record.id);
            println!("Date:      {}", record.date);
            println!("Category:  {}", record.category);
            println!("Amount:    {}", record.amount.format_with_symbol(symbol));
            if !record.tags.is_empty() {
                println!("Tags:      {}", record.tags.join(", "));
            }
            if let Some(period) = record.recurrence_period {
                println!("Recurring: {}", period);
            }
        }

        RecordCommands::Delete { id } => {
            let record_id = find(&ledger, &id)?.id;
            ledger.delete(record_id)?;
            println!("{} deleted: {}", kind, record_id.short());
        }

        RecordCommands::Update {
            id,
            amount,
            category,
            description,
            tags,
        } => {
            let record_id = find(&ledger, &id)?.id;
            let update = RecordUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                description,
                tags,
            };
            if update.is_empty() {
                return Err(FinanceError::Validation(
                    "Nothing to update. Pass --amount, --category, --description or --tags".into(),
                ));
            }

            ledger.update(record_id, update)?;
            println!("{} updated: {}", kind, record_id.short());
        }

        RecordCommands::Total { start, end } => {
            let range = date_range(start, end)?;
            println!(
                "Total {} ({}): {}",
                kind.label().to_lowercase(),
                range.label(),
                ledger.total(&range).format_with_symbol(symbol)
            );
        }

        RecordCommands::Recurring => {
            let records = ledger.list_recurring();
            print_records(kind, &records, usize::MAX, symbol);
        }
    }

    Ok(())
}

fn find<'a>(ledger: &'a Ledger, id: &str) -> FinanceResult<&'a Record> {
    ledger
        .find(id)
        .ok_or_else(|| FinanceError::record_not_found(id.trim()))
}

fn print_records(kind: RecordKind, records: &[&Record], limit: usize, symbol: &str) {
    if records.is_empty() {
        println!("No {} records found.", kind.label().to_lowercase());
        return;
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .take(limit)
        .map(|r| RecordRow::new(r, symbol))
        .collect();
    let shown = rows.len();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{}", table);

    if shown < records.len() {
        println!("\nShowing {} of {} records", shown, records.len());
    } else {
        println!("\nTotal: {} records", records.len());
    }
}
