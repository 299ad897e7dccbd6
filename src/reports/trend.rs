//! Trend Analysis Report
//!
//! Month-by-month totals over a trailing window of 30-day "months".

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Record, DATE_FORMAT};
use crate::services::Ledger;

/// Days per trend step
const STEP_DAYS: i64 = 30;

/// Longest trend window, in 30-day steps (about a century)
pub const MAX_TREND_MONTHS: u32 = 1200;

/// Monthly totals keyed by `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub user_id: String,
    /// `"<n> months"`
    pub period: String,
    pub monthly_totals: BTreeMap<String, Money>,
    /// Income minus expenses per month, when income was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_balance: Option<BTreeMap<String, Money>>,
}

/// The trailing window ending at `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TrendWindow {
    pub fn ending(today: NaiveDate, months: u32) -> FinanceResult<Self> {
        if months > MAX_TREND_MONTHS {
            return Err(FinanceError::Validation(format!(
                "Trend window of {} months is too long (maximum {})",
                months, MAX_TREND_MONTHS
            )));
        }
        let start = today
            .checked_sub_signed(Duration::days(STEP_DAYS * i64::from(months)))
            .ok_or_else(|| {
                FinanceError::Validation(format!("Trend window of {} months is out of range", months))
            })?;

        Ok(Self { start, end: today })
    }

    /// `YYYY-MM` keys at every 30-day step from the start, up to the end
    ///
    /// Steps can skip a calendar month or land twice in one.
    pub fn month_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let mut current = self.start;
        while current <= self.end {
            let key = current.format("%Y-%m").to_string();
            if keys.last() != Some(&key) {
                keys.push(key);
            }
            current += Duration::days(STEP_DAYS);
        }
        keys
    }

    fn bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

impl TrendReport {
    /// Analyze an expense ledger, optionally against an income ledger
    pub fn generate(
        expenses: &Ledger,
        income: Option<&Ledger>,
        months: u32,
        today: NaiveDate,
    ) -> FinanceResult<Self> {
        Self::from_records(
            expenses.user_id(),
            expenses.records(),
            income.map(|l| l.records()),
            months,
            today,
        )
    }

    pub fn from_records(
        user_id: &str,
        expenses: &[Record],
        income: Option<&[Record]>,
        months: u32,
        today: NaiveDate,
    ) -> FinanceResult<Self> {
        let window = TrendWindow::ending(today, months)?;
        let seeded: BTreeMap<String, Money> = window
            .month_keys()
            .into_iter()
            .map(|k| (k, Money::zero()))
            .collect();

        let mut monthly_totals = seeded.clone();
        for record in in_window(expenses, &window) {
            *monthly_totals
                .entry(record.month_key()?.to_string())
                .or_default() += record.amount;
        }

        let net_balance = match income {
            Some(income) => {
                let mut net = seeded;
                for record in in_window(income, &window) {
                    *net.entry(record.month_key()?.to_string()).or_default() += record.amount;
                }
                for record in in_window(expenses, &window) {
                    *net.entry(record.month_key()?.to_string()).or_default() -= record.amount;
                }
                Some(net)
            }
            None => None,
        };

        tracing::debug!(
            user = user_id,
            months,
            buckets = monthly_totals.len(),
            "trend analysis computed"
        );

        Ok(Self {
            user_id: user_id.to_string(),
            period: format!("{} months", months),
            monthly_totals,
            net_balance,
        })
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("Spending Trend for {}: last {}\n", self.user_id, self.period));
        output.push_str(&"=".repeat(44));
        output.push('\n');

        let header_net = if self.net_balance.is_some() { "Net" } else { "" };
        output.push_str(&format!("{:<10} {:>14} {:>14}\n", "Month", "Spent", header_net));
        output.push_str(&"-".repeat(44));
        output.push('\n');

        for (month, spent) in &self.monthly_totals {
            let net = self
                .net_balance
                .as_ref()
                .and_then(|n| n.get(month))
                .map(|m| m.format_with_symbol(symbol))
                .unwrap_or_default();
            output.push_str(&format!(
                "{:<10} {:>14} {:>14}\n",
                month,
                spent.format_with_symbol(symbol),
                net
            ));
        }
        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let map_err = |e: csv::Error| FinanceError::Report(e.to_string());

        match &self.net_balance {
            Some(_) => out.write_record(["Month", "Spent", "Net"]),
            None => out.write_record(["Month", "Spent"]),
        }
        .map_err(map_err)?;

        for (month, spent) in &self.monthly_totals {
            let mut row = vec![month.clone(), format!("{:.2}", spent.as_f64())];
            if let Some(net) = &self.net_balance {
                let value = net.get(month).copied().unwrap_or_default();
                row.push(format!("{:.2}", value.as_f64()));
            }
            out.write_record(&row).map_err(map_err)?;
        }
        out.flush().map_err(|e| FinanceError::Report(e.to_string()))?;
        Ok(())
    }
}

fn in_window<'a>(records: &'a [Record], window: &TrendWindow) -> impl Iterator<Item = &'a Record> {
    let (start, end) = window.bounds();
    records
        .iter()
        .filter(move |r| start.as_str() <= r.date.as_str() && r.date.as_str() <= end.as_str())
}
