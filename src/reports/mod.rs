//! Reports module
//!
//! Stateless aggregation over ledgers and budgets: per-category summaries,
//! budget comparison and monthly trends, plus the [`ReportBuilder`] that
//! writes them to files.

pub mod budget_comparison;
pub mod builder;
pub mod chart;
pub mod summary;
pub mod trend;

pub use budget_comparison::BudgetComparison;
pub use builder::{ReportBuilder, ReportFormat, ReportKind, DEFAULT_TREND_MONTHS, DISTRIBUTION_FILE};
pub use summary::{CategoryShare, CategorySummary};
pub use trend::{TrendReport, TrendWindow, MAX_TREND_MONTHS};
