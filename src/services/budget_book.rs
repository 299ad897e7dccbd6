//! Budget book service
//!
//! Spending targets keyed by `(category, period)`, with manually reported
//! spending. Spending is not derived from the expense ledger.

use std::collections::HashMap;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetKey, BudgetStatus, BudgetUpdate, Money, Period};
use crate::storage::{load_blob, save_blob, BlobKey, BlobKind, SharedStore};

/// Write-through collection of one user's budgets
pub struct BudgetBook {
    store: SharedStore,
    key: BlobKey,
    user_id: String,
    budgets: HashMap<BudgetKey, Budget>,
    audit: Option<AuditLogger>,
}

impl BudgetBook {
    pub fn open(store: SharedStore, user_id: &str) -> FinanceResult<Self> {
        let key = BlobKey::for_user(BlobKind::Budgets, user_id);
        let stored: Vec<Budget> = load_blob(store.as_ref(), &key)?;
        let budgets = stored.into_iter().map(|b| (b.key(), b)).collect();

        Ok(Self {
            store,
            key,
            user_id: user_id.to_string(),
            budgets,
            audit: None,
        })
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Create or replace the budget for `(category, period)`
    ///
    /// Replacing a budget resets its spending to zero.
    pub fn set(
        &mut self,
        category: &str,
        amount: Money,
        period: Period,
        alert_threshold: f64,
    ) -> FinanceResult<BudgetKey> {
        let budget = Budget::new(category, amount, period, alert_threshold)?;
        let key = budget.key();

        let mut next = self.budgets.clone();
        let previous = next.insert(key.clone(), budget.clone());
        self.commit(next)?;

        let entry = match previous {
            Some(before) => {
                AuditEntry::update(&self.user_id, EntityType::Budget, key.to_string(), &before, &budget)
            }
            None => AuditEntry::create(&self.user_id, EntityType::Budget, key.to_string(), &budget),
        };
        self.audit(entry);
        Ok(key)
    }

    /// Add reported spending to an existing budget
    pub fn add_spending(&mut self, category: &str, amount: Money, period: Period) -> FinanceResult<()> {
        if !amount.is_positive() {
            return Err(FinanceError::Validation("Spending amount must be positive".into()));
        }
        let key = BudgetKey::new(category, period);
        let Some(before) = self.budgets.get(&key).cloned() else {
            return Err(FinanceError::budget_not_found(key.to_string()));
        };

        let mut after = before.clone();
        after.spending += amount;
        self.replace(key, before, after)
    }

    /// Current standing, `None` when no such budget exists
    pub fn status(&self, category: &str, period: Period) -> Option<BudgetStatus> {
        self.budgets
            .get(&BudgetKey::new(category, period))
            .map(Budget::status)
    }

    /// Zero the spending of a budget; `false` if it does not exist
    pub fn reset(&mut self, category: &str, period: Period) -> FinanceResult<bool> {
        let key = BudgetKey::new(category, period);
        let Some(before) = self.budgets.get(&key).cloned() else {
            return Ok(false);
        };

        let mut after = before.clone();
        after.spending = Money::zero();
        self.replace(key, before, after)?;
        Ok(true)
    }

    /// Change the target fields of a budget; `false` if it does not exist
    pub fn update(&mut self, category: &str, period: Period, update: BudgetUpdate) -> FinanceResult<bool> {
        let key = BudgetKey::new(category, period);
        let Some(before) = self.budgets.get(&key).cloned() else {
            return Ok(false);
        };

        let mut after = before.clone();
        update.apply_to(&mut after)?;
        self.replace(key, before, after)?;
        Ok(true)
    }

    pub fn get(&self, category: &str, period: Period) -> Option<&Budget> {
        self.budgets.get(&BudgetKey::new(category, period))
    }

    /// All budgets, ordered by key
    pub fn list_all(&self) -> Vec<&Budget> {
        let mut budgets: Vec<&Budget> = self.budgets.values().collect();
        budgets.sort_by_key(|b| b.key());
        budgets
    }

    /// Budgets for one period, ordered by category
    pub fn for_period(&self, period: Period) -> Vec<&Budget> {
        self.list_all()
            .into_iter()
            .filter(|b| b.period == period)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn replace(&mut self, key: BudgetKey, before: Budget, after: Budget) -> FinanceResult<()> {
        let mut next = self.budgets.clone();
        next.insert(key.clone(), after.clone());
        self.commit(next)?;

        self.audit(AuditEntry::update(
            &self.user_id,
            EntityType::Budget,
            key.to_string(),
            &before,
            &after,
        ));
        Ok(())
    }

    fn commit(&mut self, next: HashMap<BudgetKey, Budget>) -> FinanceResult<()> {
        let mut ordered: Vec<&Budget> = next.values().collect();
        ordered.sort_by_key(|b| b.key());
        save_blob(self.store.as_ref(), &self.key, &ordered)?;
        self.budgets = next;
        Ok(())
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            logger.record(entry);
        }
    }
}
