//! Configuration module for the finance tracker
//!
//! - XDG-compliant path resolution with an environment override
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::{FinancePaths, DATA_DIR_ENV};
pub use settings::Settings;
