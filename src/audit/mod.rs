//! Audit logging
//!
//! Records every create, update and delete on records, budgets and users
//! with before/after snapshots in an append-only JSONL file. Stores carry an
//! optional [`AuditLogger`] and hand it an entry after each committed
//! mutation.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! let expenses = Ledger::open(store, RecordKind::Expense, "alice")?.with_audit(logger);
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
