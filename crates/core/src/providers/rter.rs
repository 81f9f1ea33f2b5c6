use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::ExchangeRateProvider;

const DEFAULT_URL: &str = "https://tw.rter.info/capi.php";
const PROVIDER: &str = "tw.rter.info";
const USD_TWD: &str = "USDTWD";

/// Exchange rates from tw.rter.info.
///
/// - **Free**: No API key.
/// - **Response**: one JSON object keyed by currency pair (`"USDTWD"`,
///   `"USDJPY"`, ...), each holding `Exrate` and `UTC`.
pub struct RterProvider {
    client: Client,
    url: String,
}

impl RterProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL)
    }

    /// Point the provider at another endpoint serving the same format.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            url: url.into(),
        }
    }

    /// Pull the USD/TWD rate out of a rter.info response body.
    pub fn parse_rate(body: &str) -> Result<f64, CoreError> {
        let mut table: HashMap<String, serde_json::Value> =
            serde_json::from_str(body).map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse currency table: {e}"),
            })?;

        let value = table.remove(USD_TWD).ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No {USD_TWD} entry in currency table"),
        })?;

        let entry: RateEntry = serde_json::from_value(value).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Malformed {USD_TWD} entry: {e}"),
        })?;

        if !entry.exrate.is_finite() || entry.exrate <= 0.0 {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Invalid {USD_TWD} rate: {}", entry.exrate),
            });
        }
        Ok(entry.exrate)
    }
}

impl Default for RterProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── rter.info response types ────────────────────────────────────────

#[derive(Deserialize)]
struct RateEntry {
    #[serde(rename = "Exrate")]
    exrate: f64,
}

#[async_trait]
impl ExchangeRateProvider for RterProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn usd_twd_rate(&self) -> Result<f64, CoreError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_rate(&body)
    }
}
