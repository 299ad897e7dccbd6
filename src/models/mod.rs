//! Core data models for the finance tracker
//!
//! Records (expenses and income), budgets, periods and user profiles.

pub mod budget;
pub mod ids;
pub mod money;
pub mod period;
pub mod range;
pub mod record;
pub mod user;

pub use budget::{Budget, BudgetKey, BudgetStatus, BudgetUpdate, DEFAULT_ALERT_THRESHOLD};
pub use ids::RecordId;
pub use money::{Money, MoneyParseError};
pub use period::Period;
pub use range::DateRange;
pub use record::{NewRecord, Record, RecordKind, RecordUpdate, DATE_FORMAT};
pub use user::{default_preferences, User};
