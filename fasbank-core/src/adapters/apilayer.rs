//! Apilayer/currencylayer API client
//!
//! Fetches live exchange rates for the rate-refresh job. The core never
//! calls this during ledger operations; it only reads the table the job
//! writes.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::RateTable;
use crate::ports::RateFetcher;

/// Default live-rates endpoint
pub const DEFAULT_RATES_URL: &str = "http://apilayer.net/api/live";
/// Environment variable holding the API access key
pub const ACCESS_KEY_ENV: &str = "FASBANK_RATES_KEY";

/// Rates API client
#[derive(Debug)]
pub struct ApilayerClient {
    url: String,
    access_key: String,
    base: String,
}

/// Live endpoint response: quotes are keyed as "<source><target>",
/// e.g. "USDEUR" -> 0.94
#[derive(Debug, Deserialize)]
struct LiveResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    quotes: BTreeMap<String, Decimal>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    info: String,
}

impl ApilayerClient {
    pub fn new(
        url: impl Into<String>,
        access_key: impl Into<String>,
        base: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            access_key: access_key.into(),
            base: base.into(),
        }
    }

    /// Build a client from the environment, failing when the access key
    /// is not configured
    pub fn from_env(url: &str, base: &str) -> Result<Self> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .map_err(|_| Error::Config(format!("{ACCESS_KEY_ENV} is not set")))?;
        Ok(Self::new(url, access_key, base))
    }
}

impl RateFetcher for ApilayerClient {
    fn fetch(&self) -> Result<RateTable> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Rates(e.to_string()))?;

        let response: LiveResponse = client
            .get(&self.url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("source", self.base.as_str()),
                ("format", "1"),
            ])
            .send()
            .map_err(|e| Error::Rates(e.to_string()))?
            .json()
            .map_err(|e| Error::Rates(e.to_string()))?;

        if !response.success {
            let info = response
                .error
                .map(|e| e.info)
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(Error::Rates(info));
        }

        // "USDEUR" -> "EUR"; drop malformed keys rather than failing the batch
        let prefix_len = self.base.len();
        let rates = response
            .quotes
            .into_iter()
            .filter(|(pair, _)| pair.len() > prefix_len)
            .map(|(pair, rate)| (pair[prefix_len..].to_string(), rate))
            .collect();

        Ok(RateTable {
            base: self.base.clone(),
            last_updated: Some(Utc::now()),
            rates,
        })
    }
}
