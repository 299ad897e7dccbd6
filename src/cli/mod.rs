//! CLI command handlers
//!
//! Bridges the clap argument parsing with the stores and reports. Handlers
//! print to stdout and return errors to `main`.

pub mod budget;
pub mod history;
pub mod record;
pub mod report;
pub mod user;

pub use budget::{handle_budget_command, BudgetCommands};
pub use history::handle_history_command;
pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportCommands};
pub use user::{handle_register_command, handle_user_command, password_or_prompt, UserCommands};

use std::sync::Arc;

use crate::audit::AuditLogger;
use crate::config::{FinancePaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, Money, RecordKind};
use crate::services::{BudgetBook, IdentityStore, Ledger};
use crate::storage::{JsonFileStore, SharedStore};

/// Everything a command needs: paths, settings, storage and the audit log
pub struct CliContext {
    pub paths: FinancePaths,
    pub settings: Settings,
    pub store: SharedStore,
    pub audit: AuditLogger,
}

impl CliContext {
    /// Build the context for the data directory in `paths`
    pub fn open(paths: FinancePaths, settings: Settings) -> FinanceResult<Self> {
        paths.ensure_directories()?;
        let store: SharedStore = Arc::new(JsonFileStore::new(paths.data_dir()));
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            store,
            audit,
        })
    }

    pub fn identities(&self) -> FinanceResult<IdentityStore> {
        Ok(IdentityStore::open(self.store.clone())?.with_audit(self.audit.clone()))
    }

    pub fn ledger(&self, kind: RecordKind, user_id: &str) -> FinanceResult<Ledger> {
        Ok(Ledger::open(self.store.clone(), kind, user_id)?.with_audit(self.audit.clone()))
    }

    pub fn budgets(&self, user_id: &str) -> FinanceResult<BudgetBook> {
        Ok(BudgetBook::open(self.store.clone(), user_id)?.with_audit(self.audit.clone()))
    }

    /// Check credentials, failing with `Authentication` on a mismatch
    pub fn authenticate(&self, user_id: &str, password: &str) -> FinanceResult<()> {
        if self.identities()?.authenticate(user_id, password)? {
            tracing::debug!(user = user_id, "authenticated");
            Ok(())
        } else {
            Err(FinanceError::Authentication(
                "Invalid username or password".into(),
            ))
        }
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Parse a user-supplied amount such as `12.50` or `$12.50`
pub fn parse_amount(s: &str) -> FinanceResult<Money> {
    Money::parse(s).map_err(|e| FinanceError::Validation(format!("Invalid amount '{}': {}", s, e)))
}

/// Build a date range from optional `--start`/`--end` flags
pub fn date_range(start: Option<String>, end: Option<String>) -> FinanceResult<DateRange> {
    let range = DateRange::new(start, end);
    range.validate()?;
    Ok(range)
}
