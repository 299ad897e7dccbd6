//! Period model
//!
//! A period is both the cadence of a budget and the recurrence interval of a
//! recurring record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;

/// Budget cadence / recurrence interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    /// All valid periods, in cadence order
    pub const ALL: [Period; 4] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Yearly,
    ];

    /// Lowercase name as used in budget keys and on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(FinanceError::Validation(format!(
                "Invalid period '{}'. Choose: daily, weekly, monthly, yearly",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!(" Weekly ".parse::<Period>().unwrap(), Period::Weekly);
        assert_eq!("YEARLY".parse::<Period>().unwrap(), Period::Yearly);
    }

    #[test]
    fn test_unknown_period_is_validation_error() {
        let err = "fortnightly".parse::<Period>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Period::Daily).unwrap(), "\"daily\"");
        let p: Period = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(p, Period::Yearly);
    }

    #[test]
    fn test_default_is_monthly() {
        assert_eq!(Period::default(), Period::Monthly);
    }
}
