//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "baseCurrency": "USD",
//!   "ratesUrl": "http://apilayer.net/api/live"
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::apilayer::DEFAULT_RATES_URL;

/// Raw settings.json structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default = "default_base_currency")]
    base_currency: String,
    #[serde(default)]
    rates_url: Option<String>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rates_url: None,
        }
    }
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// The currency all exchange rates are expressed against
    pub base_currency: String,
    /// Endpoint the rate-refresh job pulls from
    pub rates_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rates_url: DEFAULT_RATES_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The base currency can be overridden via FASBANK_BASE_CURRENCY
    /// (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let base_currency = std::env::var("FASBANK_BASE_CURRENCY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(raw.base_currency)
            .trim()
            .to_uppercase();

        Ok(Self {
            base_currency,
            rates_url: raw.rates_url.unwrap_or_else(|| DEFAULT_RATES_URL.to_string()),
        })
    }

    /// Save config to the data directory
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings = SettingsFile {
            base_currency: self.base_currency.clone(),
            rates_url: Some(self.rates_url.clone()),
        };
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }
}
