//! Budget Comparison Report
//!
//! Reported spending against every budget of one period.

use std::io::Write;

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{BudgetStatus, Money, Period};
use crate::services::BudgetBook;

/// Status rows for all budgets of one period, ordered by category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BudgetComparison {
    pub rows: Vec<BudgetStatus>,
}

impl BudgetComparison {
    pub fn generate(book: &BudgetBook, period: Period) -> Self {
        let rows = book
            .for_period(period)
            .into_iter()
            .map(|b| b.status())
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_budgeted(&self) -> Money {
        self.rows.iter().map(|r| r.budget).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.rows.iter().map(|r| r.spent).sum()
    }

    /// Rows past their alert threshold
    pub fn alerts(&self) -> Vec<&BudgetStatus> {
        self.rows.iter().filter(|r| r.alert_triggered).collect()
    }

    /// Format the comparison for terminal display
    pub fn format_terminal(&self, period: Period, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("Budget Comparison ({})\n", period));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str(&format!("No {} budgets set.\n", period));
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}  {}\n",
            "Category", "Budget", "Spent", "Remaining", "Status"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let status = if row.over_budget {
                "OVER"
            } else if row.alert_triggered {
                "ALERT"
            } else {
                "ok"
            };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>12}  {}\n",
                row.category,
                row.budget.format_with_symbol(symbol),
                row.spent.format_with_symbol(symbol),
                row.remaining.format_with_symbol(symbol),
                status
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12}\n",
            "TOTAL",
            self.total_budgeted().format_with_symbol(symbol),
            self.total_spent().format_with_symbol(symbol)
        ));
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let map_err = |e: csv::Error| FinanceError::Report(e.to_string());

        out.write_record([
            "Category",
            "Period",
            "Budget",
            "Spent",
            "Remaining",
            "Over Budget",
            "Alert",
        ])
        .map_err(map_err)?;

        for row in &self.rows {
            out.write_record([
                row.category.clone(),
                row.period.to_string(),
                format!("{:.2}", row.budget.as_f64()),
                format!("{:.2}", row.spent.as_f64()),
                format!("{:.2}", row.remaining.as_f64()),
                row.over_budget.to_string(),
                row.alert_triggered.to_string(),
            ])
            .map_err(map_err)?;
        }
        out.flush().map_err(|e| FinanceError::Report(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SharedStore};
    use std::sync::Arc;

    fn book() -> BudgetBook {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut book = BudgetBook::open(store, "alice").unwrap();
        book.set("Food", Money::from_units(500), Period::Monthly, 0.8).unwrap();
        book.set("Rent", Money::from_units(1000), Period::Monthly, 0.9).unwrap();
        book.set("Coffee", Money::from_units(20), Period::Weekly, 0.8).unwrap();
        book.add_spending("Food", Money::from_units(450), Period::Monthly).unwrap();
        book
    }

    #[test]
    fn test_only_matching_period() {
        let comparison = BudgetComparison::generate(&book(), Period::Monthly);
        assert_eq!(comparison.rows.len(), 2);
        assert_eq!(comparison.rows[0].category, "Food");
        assert_eq!(comparison.alerts().len(), 1);
        assert_eq!(comparison.total_budgeted(), Money::from_units(1500));

        let yearly = BudgetComparison::generate(&book(), Period::Yearly);
        assert!(yearly.is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let comparison = BudgetComparison::generate(&book(), Period::Weekly);
        let value = serde_json::to_value(&comparison).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["category"], "Coffee");
        assert_eq!(value[0]["period"], "weekly");
        assert_eq!(value[0]["remaining"], 20.0);
    }

    #[test]
    fn test_terminal_marks_alerts() {
        let comparison = BudgetComparison::generate(&book(), Period::Monthly);
        let text = comparison.format_terminal(Period::Monthly, "$");
        assert!(text.contains("ALERT"));
        assert!(text.contains("$1500.00"));
    }

    #[test]
    fn test_export_csv() {
        let comparison = BudgetComparison::generate(&book(), Period::Monthly);
        let mut buffer = Vec::new();
        comparison.export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Food,monthly,500.00,450.00,50.00,false,true"));
    }
}
