//! Report files
//!
//! Renders reports into the user's report directory as JSON, YAML or CSV,
//! plus the category distribution chart.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::budget_comparison::BudgetComparison;
use super::chart;
use super::summary::CategorySummary;
use super::trend::TrendReport;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, Period};
use crate::services::{BudgetBook, Ledger};
use crate::storage::write_text_atomic;

/// Months covered by a generated trend report unless configured otherwise
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// File name of the distribution chart
pub const DISTRIBUTION_FILE: &str = "category_distribution.txt";

/// Reports that can be written to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    CategorySummary,
    IncomeSummary,
    BudgetComparison,
    TrendAnalysis,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        Self::CategorySummary,
        Self::IncomeSummary,
        Self::BudgetComparison,
        Self::TrendAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CategorySummary => "category_summary",
            Self::IncomeSummary => "income_summary",
            Self::BudgetComparison => "budget_comparison",
            Self::TrendAnalysis => "trend_analysis",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                FinanceError::Validation(format!(
                    "Unknown report type '{}'. Choose: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// File format of generated reports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A report that can be flattened to CSV as well as serialized
trait Tabular: Serialize {
    fn write_csv(&self, buffer: &mut Vec<u8>) -> FinanceResult<()>;
}

impl Tabular for CategorySummary {
    fn write_csv(&self, buffer: &mut Vec<u8>) -> FinanceResult<()> {
        self.export_csv(buffer)
    }
}

impl Tabular for BudgetComparison {
    fn write_csv(&self, buffer: &mut Vec<u8>) -> FinanceResult<()> {
        self.export_csv(buffer)
    }
}

impl Tabular for TrendReport {
    fn write_csv(&self, buffer: &mut Vec<u8>) -> FinanceResult<()> {
        self.export_csv(buffer)
    }
}

/// Writes report files for one user
pub struct ReportBuilder<'a> {
    expenses: &'a Ledger,
    income: &'a Ledger,
    budgets: &'a BudgetBook,
    output_dir: PathBuf,
    format: ReportFormat,
    trend_months: u32,
    currency_symbol: String,
    today: NaiveDate,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(
        expenses: &'a Ledger,
        income: &'a Ledger,
        budgets: &'a BudgetBook,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            expenses,
            income,
            budgets,
            output_dir: output_dir.into(),
            format: ReportFormat::default(),
            trend_months: DEFAULT_TREND_MONTHS,
            currency_symbol: "$".to_string(),
            today: Local::now().date_naive(),
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_trend_months(mut self, months: u32) -> Self {
        self.trend_months = months;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Fix the date trend windows end at
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a report to `{kind}_{start|all}_{end|all}.{ext}` and return its path
    ///
    /// The budget comparison always covers monthly budgets and the trend
    /// analysis the configured number of months; only the summaries use
    /// `range`, though it always names the file.
    pub fn generate(&self, kind: ReportKind, range: &DateRange) -> FinanceResult<PathBuf> {
        range.validate()?;
        let contents = match kind {
            ReportKind::CategorySummary => {
                self.render(&CategorySummary::generate(self.expenses, range))?
            }
            ReportKind::IncomeSummary => {
                self.render(&CategorySummary::generate(self.income, range))?
            }
            ReportKind::BudgetComparison => {
                self.render(&BudgetComparison::generate(self.budgets, Period::Monthly))?
            }
            ReportKind::TrendAnalysis => self.render(&TrendReport::generate(
                self.expenses,
                Some(self.income),
                self.trend_months,
                self.today,
            )?)?,
        };

        let file_name = format!("{}_{}.{}", kind, range.file_stem(), self.format.extension());
        let path = self.write(&file_name, &contents)?;
        tracing::debug!(report = %kind, path = %path.display(), "report written");
        Ok(path)
    }

    /// Write the expense distribution chart and return its path
    pub fn plot_category_distribution(&self, range: &DateRange) -> FinanceResult<PathBuf> {
        range.validate()?;
        let summary = CategorySummary::generate(self.expenses, range);
        let contents = chart::category_distribution(&summary, &self.currency_symbol);
        let path = self.write(DISTRIBUTION_FILE, &contents)?;
        tracing::debug!(path = %path.display(), "distribution chart written");
        Ok(path)
    }

    fn render<T: Tabular>(&self, report: &T) -> FinanceResult<String> {
        match self.format {
            ReportFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| FinanceError::Report(format!("Failed to render JSON: {}", e))),
            ReportFormat::Yaml => serde_yaml::to_string(report)
                .map_err(|e| FinanceError::Report(format!("Failed to render YAML: {}", e))),
            ReportFormat::Csv => {
                let mut buffer = Vec::new();
                report.write_csv(&mut buffer)?;
                String::from_utf8(buffer)
                    .map_err(|e| FinanceError::Report(format!("Failed to render CSV: {}", e)))
            }
        }
    }

    fn write(&self, file_name: &str, contents: &str) -> FinanceResult<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            FinanceError::Io(format!(
                "Failed to create report directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        let path = self.output_dir.join(file_name);
        write_text_atomic(&path, contents)?;
        Ok(path)
    }
}
