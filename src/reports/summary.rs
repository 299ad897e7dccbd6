//! Category Summary Report
//!
//! Totals a ledger's records per category over an optional date range. Used
//! for both the expense summary and the income summary.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, Money, Record};
use crate::services::Ledger;

/// Per-category totals for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub user_id: String,
    /// `"<start|all> to <end|all>"`
    pub period: String,
    pub category_totals: BTreeMap<String, Money>,
    pub total: Money,
}

/// One category's share of the summary total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    pub percentage: f64,
}

impl CategorySummary {
    /// Summarize a ledger
    pub fn generate(ledger: &Ledger, range: &DateRange) -> Self {
        Self::from_records(ledger.user_id(), ledger.records(), range)
    }

    pub fn from_records(user_id: &str, records: &[Record], range: &DateRange) -> Self {
        let mut category_totals: BTreeMap<String, Money> = BTreeMap::new();
        for record in records.iter().filter(|r| range.contains(&r.date)) {
            *category_totals.entry(record.category.clone()).or_default() += record.amount;
        }
        let total = category_totals.values().sum();

        Self {
            user_id: user_id.to_string(),
            period: range.label(),
            category_totals,
            total,
        }
    }

    /// Categories with their percentage of the total, largest first
    pub fn shares(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = self
            .category_totals
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percentage: if self.total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / self.total.cents() as f64 * 100.0
                },
            })
            .collect();
        shares.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
        shares
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, title: &str, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} for {}: {}\n", title, self.user_id, self.period));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.category_totals.is_empty() {
            output.push_str("No records in this period.\n");
            return output;
        }

        output.push_str(&format!("{:<28} {:>12} {:>7}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for share in self.shares() {
            output.push_str(&format!(
                "{:<28} {:>12} {:>6.1}%\n",
                share.category,
                share.amount.format_with_symbol(symbol),
                share.percentage
            ));
        }
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol)
        ));
        output
    }

    /// Export as `Category,Amount` rows followed by a total row
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let map_err = |e: csv::Error| FinanceError::Report(e.to_string());

        out.write_record(["Category", "Amount"]).map_err(map_err)?;
        for (category, amount) in &self.category_totals {
            let amount = format!("{:.2}", amount.as_f64());
            out.write_record([category.as_str(), amount.as_str()])
                .map_err(map_err)?;
        }
        let total = format!("{:.2}", self.total.as_f64());
        out.write_record(["TOTAL", total.as_str()]).map_err(map_err)?;
        out.flush().map_err(|e| FinanceError::Report(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRecord;

    fn records() -> Vec<Record> {
        vec![
            NewRecord::new(Money::from_units(50), "Food", "Lunch")
                .on("2025-01-01")
                .into_record()
                .unwrap(),
            NewRecord::new(Money::from_units(20), "Transport", "Bus")
                .on("2025-01-15")
                .into_record()
                .unwrap(),
            NewRecord::new(Money::from_units(30), "Food", "Dinner")
                .on("2025-02-03")
                .into_record()
                .unwrap(),
        ]
    }

    #[test]
    fn test_summary_over_all_records() {
        let summary = CategorySummary::from_records("alice", &records(), &DateRange::all());
        assert_eq!(summary.period, "all to all");
        assert_eq!(summary.category_totals["Food"], Money::from_units(80));
        assert_eq!(summary.category_totals["Transport"], Money::from_units(20));
        assert_eq!(summary.total, Money::from_units(100));
    }

    #[test]
    fn test_summary_in_range() {
        let range = DateRange::between("2025-01-01", "2025-01-31");
        let summary = CategorySummary::from_records("alice", &records(), &range);
        assert_eq!(summary.period, "2025-01-01 to 2025-01-31");
        assert_eq!(summary.category_totals["Food"], Money::from_units(50));
        assert_eq!(summary.total, Money::from_units(70));
    }

    #[test]
    fn test_summary_of_two_days() {
        let records = vec![
            NewRecord::new(Money::from_units(50), "Food", "Lunch")
                .on("2025-01-01")
                .into_record()
                .unwrap(),
            NewRecord::new(Money::from_units(30), "Transport", "Taxi")
                .on("2025-01-02")
                .into_record()
                .unwrap(),
        ];
        let range = DateRange::between("2025-01-01", "2025-01-02");
        let summary = CategorySummary::from_records("alice", &records, &range);

        assert_eq!(summary.category_totals.len(), 2);
        assert_eq!(summary.category_totals["Food"], Money::from_units(50));
        assert_eq!(summary.category_totals["Transport"], Money::from_units(30));
        assert_eq!(summary.total, Money::from_units(80));
    }

    #[test]
    fn test_empty_summary() {
        let summary = CategorySummary::from_records("bob", &[], &DateRange::all());
        assert!(summary.category_totals.is_empty());
        assert!(summary.total.is_zero());
        assert!(summary.shares().is_empty());
        assert!(summary.format_terminal("Expense Summary", "$").contains("No records"));
    }

    #[test]
    fn test_json_shape() {
        let summary = CategorySummary::from_records("alice", &records(), &DateRange::all());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["user_id"], "alice");
        assert_eq!(value["category_totals"]["Food"], 80.0);
        assert_eq!(value["total"], 100.0);
    }

    #[test]
    fn test_shares_largest_first() {
        let summary = CategorySummary::from_records("alice", &records(), &DateRange::all());
        let shares = summary.shares();
        assert_eq!(shares[0].category, "Food");
        assert!((shares[0].percentage - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_csv() {
        let summary = CategorySummary::from_records("alice", &records(), &DateRange::all());
        let mut buffer = Vec::new();
        summary.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Category,Amount\n"));
        assert!(csv.contains("Food,80.00\n"));
        assert!(csv.ends_with("TOTAL,100.00\n"));
    }
}
