//! Calculator configuration

use clap::ValueEnum;
use serde::Deserialize;

use core_kernel::{Currency, CurrencyFormat};
use domain_commission::CalculationModel;

/// Log line format written to stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Calculation model applied when the command line does not pick one
    pub model: CalculationModel,
    /// Log level or filter directive
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Currency used by the text report
    pub currency: Currency,
    /// Amount style used by the text report
    pub currency_format: CurrencyFormat,
    /// Substitute the default partner split when no lines are configured
    pub apply_default_lines: bool,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            model: CalculationModel::Advanced,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            currency: Currency::EUR,
            currency_format: CurrencyFormat::Symbol,
            apply_default_lines: false,
        }
    }
}

impl CalcConfig {
    /// Loads configuration from `COMMISSION_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("COMMISSION").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
