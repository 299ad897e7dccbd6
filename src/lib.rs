//! Personal finance tracker
//!
//! Records expenses and income per user, tracks budgets with alert
//! thresholds, and aggregates everything into category summaries, budget
//! comparisons and monthly trends.
//!
//! # Architecture
//!
//! - `models`: records, budgets, periods, money, users
//! - `storage`: the blob store port with file and in-memory backends
//! - `services`: the write-through ledger, budget book and identity stores
//! - `reports`: stateless aggregation and report files
//! - `audit`: append-only log of every change
//! - `crypto`: password hashing
//! - `config`: paths and settings
//! - `cli`: command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finance_tracker::models::{DateRange, Money, NewRecord, RecordKind};
//! use finance_tracker::services::Ledger;
//! use finance_tracker::storage::{MemoryStore, SharedStore};
//!
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let mut expenses = Ledger::open(store, RecordKind::Expense, "alice")?;
//! expenses.add(NewRecord::new(Money::from_units(50), "Food", "Lunch"))?;
//! assert_eq!(expenses.total(&DateRange::all()), Money::from_units(50));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
