//! Record model
//!
//! Expenses and income share one shape; only the ledger they live in decides
//! whether they add to or subtract from the balance.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecordId;
use super::money::Money;
use super::period::Period;
use crate::error::{FinanceError, FinanceResult};

/// Date format used for record dates and range bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which ledger a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dated, categorized monetary record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, assigned at creation
    pub id: RecordId,

    /// Always positive
    pub amount: Money,

    pub category: String,

    pub description: String,

    /// `YYYY-MM-DD`; compared as text by range filters
    pub date: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_recurring: bool,

    #[serde(default)]
    pub recurrence_period: Option<Period>,
}

impl Record {
    /// Case-insensitive category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive match against any tag
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// The `YYYY-MM` bucket of this record's date
    pub fn month_key(&self) -> FinanceResult<&str> {
        self.date.get(..7).ok_or_else(|| {
            FinanceError::Corrupt(format!(
                "record {} has malformed date '{}'",
                self.id, self.date
            ))
        })
    }
}

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub amount: Money,
    pub category: String,
    pub description: String,
    /// Defaults to today's local date
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub is_recurring: bool,
    pub recurrence_period: Option<Period>,
}

impl NewRecord {
    pub fn new(amount: Money, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn tagged<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn recurring(mut self, period: Period) -> Self {
        self.is_recurring = true;
        self.recurrence_period = Some(period);
        self
    }

    /// Validate and build the stored record
    pub fn into_record(self) -> FinanceResult<Record> {
        validate_amount(self.amount)?;
        let category = self.category.trim();
        let description = self.description.trim();
        if category.is_empty() || description.is_empty() {
            return Err(FinanceError::Validation(
                "Category and description cannot be empty".into(),
            ));
        }
        if self.is_recurring && self.recurrence_period.is_none() {
            return Err(FinanceError::Validation(
                "Recurring records must specify a period".into(),
            ));
        }
        let date = match self.date {
            Some(date) => validate_date(&date)?,
            None => Local::now().date_naive().format(DATE_FORMAT).to_string(),
        };

        Ok(Record {
            id: RecordId::new(),
            amount: self.amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
            tags: self.tags,
            is_recurring: self.is_recurring,
            recurrence_period: self.recurrence_period,
        })
    }
}

/// Partial replacement of a record's mutable fields
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RecordUpdate {
    /// Validate every supplied field, then apply them all
    ///
    /// Nothing is written to `record` unless every field is valid.
    pub fn apply_to(self, record: &mut Record) -> FinanceResult<()> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        let category = self.category.map(|c| c.trim().to_string());
        if matches!(&category, Some(c) if c.is_empty()) {
            return Err(FinanceError::Validation("Category cannot be empty".into()));
        }
        let description = self.description.map(|d| d.trim().to_string());
        if matches!(&description, Some(d) if d.is_empty()) {
            return Err(FinanceError::Validation("Description cannot be empty".into()));
        }

        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(category) = category {
            record.category = category;
        }
        if let Some(description) = description {
            record.description = description;
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

fn validate_amount(amount: Money) -> FinanceResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(FinanceError::Validation("Amount must be positive".into()))
    }
}

fn validate_date(date: &str) -> FinanceResult<String> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| FinanceError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", date)))?;
    Ok(date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_trims_text() {
        let record = NewRecord::new(Money::from_units(50), "  Food ", " Lunch  ")
            .on("2025-01-01")
            .into_record()
            .unwrap();
        assert_eq!(record.category, "Food");
        assert_eq!(record.description, "Lunch");
        assert_eq!(record.date, "2025-01-01");
        assert!(!record.is_recurring);
    }

    #[test]
    fn test_date_defaults_to_today() {
        let record = NewRecord::new(Money::from_units(1), "Food", "Snack")
            .into_record()
            .unwrap();
        let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
        assert_eq!(record.date, today);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let zero = NewRecord::new(Money::zero(), "Food", "Nothing");
        assert!(zero.into_record().unwrap_err().is_validation());

        let blank = NewRecord::new(Money::from_units(1), "   ", "Lunch");
        assert!(blank.into_record().unwrap_err().is_validation());

        let mut no_period = NewRecord::new(Money::from_units(1), "Rent", "Flat");
        no_period.is_recurring = true;
        assert!(no_period.into_record().unwrap_err().is_validation());

        let bad_date = NewRecord::new(Money::from_units(1), "Food", "Lunch").on("01/02/2025");
        assert!(bad_date.into_record().unwrap_err().is_validation());
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut record = NewRecord::new(Money::from_units(10), "Food", "Lunch")
            .on("2025-01-01")
            .into_record()
            .unwrap();
        let before = record.clone();

        let update = RecordUpdate {
            amount: Some(Money::from_units(20)),
            description: Some("  ".into()),
            ..Default::default()
        };
        assert!(update.apply_to(&mut record).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_tag_and_category_matching() {
        let record = NewRecord::new(Money::from_units(10), "Food", "Lunch")
            .tagged(["Work", "team"])
            .into_record()
            .unwrap();
        assert!(record.in_category("FOOD"));
        assert!(record.has_tag("work"));
        assert!(!record.has_tag("home"));
    }

    #[test]
    fn test_month_key_requires_full_date() {
        let mut record = NewRecord::new(Money::from_units(10), "Food", "Lunch")
            .on("2025-03-09")
            .into_record()
            .unwrap();
        assert_eq!(record.month_key().unwrap(), "2025-03");

        record.date = "2025".into();
        assert!(matches!(record.month_key(), Err(FinanceError::Corrupt(_))));
    }

    #[test]
    fn test_json_shape() {
        let record = NewRecord::new(Money::from_cents(1250), "Food", "Lunch")
            .on("2025-01-01")
            .recurring(Period::Weekly)
            .into_record()
            .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["amount"], 12.5);
        assert_eq!(value["recurrence_period"], "weekly");
        assert_eq!(value["is_recurring"], true);
        assert!(value["tags"].as_array().unwrap().is_empty());
    }
}
