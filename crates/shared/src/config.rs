//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Invoicing defaults.
    #[serde(default)]
    pub invoicing: InvoicingConfig,
    /// Tax settings.
    #[serde(default)]
    pub tax: TaxConfig,
}

/// Invoicing defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
    /// Default payment terms, in days, for new invoices.
    #[serde(default = "default_payment_terms_days")]
    pub default_payment_terms_days: u32,
}

fn default_payment_terms_days() -> u32 {
    30
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            default_payment_terms_days: default_payment_terms_days(),
        }
    }
}

/// Tax settings used by the export aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// IRS standard mileage rate per tax year, in dollars per mile,
    /// keyed by year (e.g. "2024" -> 0.67).
    #[serde(default = "default_mileage_rates")]
    pub standard_mileage_rates: HashMap<String, Decimal>,
    /// Deductible fraction for meals expenses (IRS: 50%).
    #[serde(default = "default_meals_percent")]
    pub meals_deductible_percent: Decimal,
}

fn default_mileage_rates() -> HashMap<String, Decimal> {
    HashMap::from([
        ("2022".to_string(), Decimal::new(585, 3)),
        ("2023".to_string(), Decimal::new(655, 3)),
        ("2024".to_string(), Decimal::new(67, 2)),
        ("2025".to_string(), Decimal::new(70, 2)),
    ])
}

fn default_meals_percent() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            standard_mileage_rates: default_mileage_rates(),
            meals_deductible_percent: default_meals_percent(),
        }
    }
}

impl TaxConfig {
    /// Returns the standard mileage rate for the given tax year, if known.
    #[must_use]
    pub fn mileage_rate(&self, tax_year: i32) -> Option<Decimal> {
        self.standard_mileage_rates.get(&tax_year.to_string()).copied()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SIDEGIG").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
