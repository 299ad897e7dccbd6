//! Budget model
//!
//! A budget is a spending target for one category over one period, plus a
//! manually reported spending accumulator.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::Period;
use crate::error::{FinanceError, FinanceResult};

/// Threshold used when none is given
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.8;

/// Identity of a budget: the `(category, period)` pair
///
/// Displays as the literal `category_period` key. Category comparison is
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetKey {
    pub category: String,
    pub period: Period,
}

impl BudgetKey {
    pub fn new(category: &str, period: Period) -> Self {
        Self {
            category: category.trim().to_string(),
            period,
        }
    }
}

impl fmt::Display for BudgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.period)
    }
}

/// A spending target with its running spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: Money,
    pub period: Period,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    #[serde(default)]
    pub spending: Money,
}

fn default_alert_threshold() -> f64 {
    DEFAULT_ALERT_THRESHOLD
}

impl Budget {
    /// Validate inputs and create a budget with zero spending
    pub fn new(
        category: &str,
        amount: Money,
        period: Period,
        alert_threshold: f64,
    ) -> FinanceResult<Self> {
        validate_amount(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation("Category cannot be empty".into()));
        }
        validate_threshold(alert_threshold)?;

        Ok(Self {
            category: category.to_string(),
            amount,
            period,
            alert_threshold,
            spending: Money::zero(),
        })
    }

    pub fn key(&self) -> BudgetKey {
        BudgetKey::new(&self.category, self.period)
    }

    /// Current standing against the target
    pub fn status(&self) -> BudgetStatus {
        let spent = self.spending;
        BudgetStatus {
            category: self.category.clone(),
            period: self.period,
            budget: self.amount,
            spent,
            remaining: self.amount - spent,
            over_budget: spent > self.amount,
            alert_triggered: spent.cents() as f64 >= self.amount.scaled_cents(self.alert_threshold),
        }
    }
}

/// Snapshot of a budget's standing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub period: Period,
    pub budget: Money,
    pub spent: Money,
    pub remaining: Money,
    pub over_budget: bool,
    pub alert_triggered: bool,
}

/// Partial replacement of a budget's target fields
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub amount: Option<Money>,
    pub alert_threshold: Option<f64>,
}

impl BudgetUpdate {
    /// Validate every supplied field, then apply them all
    pub fn apply_to(self, budget: &mut Budget) -> FinanceResult<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(threshold) = self.alert_threshold {
            validate_threshold(threshold)?;
        }

        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(threshold) = self.alert_threshold {
            budget.alert_threshold = threshold;
        }
        Ok(())
    }
}

fn validate_amount(amount: Money) -> FinanceResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(FinanceError::Validation("Budget amount must be positive".into()))
    }
}

fn validate_threshold(threshold: f64) -> FinanceResult<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(FinanceError::Validation(
            "Alert threshold must be between 0 and 1".into(),
        ))
    }
}
