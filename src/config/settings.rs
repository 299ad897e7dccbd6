//! User settings for the finance tracker
//!
//! Stored as `config.json` in the base directory. Missing fields take their
//! defaults, so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::{Period, DEFAULT_ALERT_THRESHOLD};
use crate::reports::{ReportFormat, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS};
use crate::storage::write_text_atomic;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Period used by budget commands when none is given
    #[serde(default)]
    pub default_period: Period,

    #[serde(default = "default_alert_threshold")]
    pub default_alert_threshold: f64,

    /// Months covered by trend reports
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    #[serde(default)]
    pub report_format: ReportFormat,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_alert_threshold() -> f64 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_trend_months() -> u32 {
    DEFAULT_TREND_MONTHS
}

fn default_log_filter() -> String {
    "finance_tracker=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_period: Period::default(),
            default_alert_threshold: default_alert_threshold(),
            trend_months: default_trend_months(),
            report_format: ReportFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        write_text_atomic(paths.settings_file(), &contents)
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        if !(0.0..=1.0).contains(&self.default_alert_threshold) {
            return Err(FinanceError::Config(format!(
                "default_alert_threshold must be between 0 and 1, got {}",
                self.default_alert_threshold
            )));
        }
        if self.trend_months > MAX_TREND_MONTHS {
            return Err(FinanceError::Config(format!(
                "trend_months must be at most {}, got {}",
                MAX_TREND_MONTHS, self.trend_months
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_period, Period::Monthly);
        assert_eq!(settings.default_alert_threshold, 0.8);
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_period = Period::Weekly;
        settings.report_format = ReportFormat::Yaml;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.log_filter, "finance_tracker=warn");
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_alert_threshold": 3.0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }

    #[test]
    fn test_oversized_trend_months_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"trend_months": 5000000}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }
}
