//! Stateful stores for one user's financial data
//!
//! Each store owns an in-memory collection backed by a single blob and writes
//! the whole collection through on every successful mutation.

pub mod budget_book;
pub mod identity;
pub mod ledger;

pub use budget_book::BudgetBook;
pub use identity::{IdentityStore, UserUpdate, MIN_PASSWORD_LEN};
pub use ledger::Ledger;
