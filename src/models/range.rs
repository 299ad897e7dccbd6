//! Date range filter for totals and reports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::DATE_FORMAT;
use crate::error::{FinanceError, FinanceResult};

/// Optional inclusive `[start, end]` bounds on record dates
///
/// Bounds are compared as `YYYY-MM-DD` text. The range only filters when both
/// bounds are present; a half-open range matches every date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    /// Matches every date
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Both bounds, when the range actually filters
    pub fn bounds(&self) -> Option<(&str, &str)> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Some((start.as_str(), end.as_str())),
            _ => None,
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }

    /// Check that every given bound is a `YYYY-MM-DD` date
    pub fn validate(&self) -> FinanceResult<()> {
        for bound in [&self.start, &self.end].into_iter().flatten() {
            let well_formed = bound.len() == 10
                && NaiveDate::parse_from_str(bound, DATE_FORMAT).is_ok();
            if !well_formed {
                return Err(FinanceError::Validation(format!(
                    "Invalid date '{}'. Use YYYY-MM-DD",
                    bound
                )));
            }
        }
        Ok(())
    }

    /// `"<start|all> to <end|all>"`
    pub fn label(&self) -> String {
        format!("{} to {}", self.start_label(), self.end_label())
    }

    /// `"<start|all>_<end|all>"`, used in report file names
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.start_label(), self.end_label())
    }

    fn start_label(&self) -> &str {
        self.start.as_deref().unwrap_or("all")
    }

    fn end_label(&self) -> &str {
        self.end.as_deref().unwrap_or("all")
    }
}
