use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::StockPriceProvider;

const DEFAULT_URL: &str = "https://www.twse.com.tw/exchangeReport/STOCK_DAY";
const PROVIDER: &str = "TWSE";

/// Column of the closing price in a STOCK_DAY row.
const CLOSE_COLUMN: usize = 6;

/// Taiwan Stock Exchange daily trading report (`STOCK_DAY`).
///
/// - **Free**: No API key.
/// - **Response**: `stat` plus a `data` array with one row per trading day of
///   the current month, oldest first. Every cell is a string; prices use
///   thousands separators (`"1,025.00"`).
/// - The last row is the most recent trading day.
pub struct TwseProvider {
    client: Client,
    url: String,
}

impl TwseProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL)
    }

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

    /// Extract the latest closing price from a STOCK_DAY response body.
    pub fn parse_latest_close(ticker: &str, body: &str) -> Result<f64, CoreError> {
        let resp: StockDayResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse daily report for {ticker}: {e}"),
        })?;

        if let Some(stat) = resp.stat.as_deref() {
            if !stat.eq_ignore_ascii_case("OK") {
                return Err(CoreError::Api {
                    provider: PROVIDER.into(),
                    message: format!("Daily report for {ticker} rejected: {stat}"),
                });
            }
        }

        let last_row = resp
            .data
            .last()
            .ok_or_else(|| CoreError::PriceNotAvailable {
                ticker: ticker.to_string(),
            })?;

        let cell = last_row.get(CLOSE_COLUMN).ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!(
                "Daily row for {ticker} has {} columns, expected at least {}",
                last_row.len(),
                CLOSE_COLUMN + 1
            ),
        })?;

        parse_price(cell).ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Unparseable closing price '{cell}' for {ticker}"),
        })
    }
}

impl Default for TwseProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a TWSE price cell such as `"1,025.00"`.
fn parse_price(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|c| *c != ',').collect();
    let price: f64 = cleaned.trim().parse().ok()?;
    price.is_finite().then_some(price)
}

// ── TWSE response types ─────────────────────────────────────────────

#[derive(Deserialize)]
struct StockDayResponse {
    stat: Option<String>,
    #[serde(default)]
    data: Vec<Vec<String>>,
}

#[async_trait]
impl StockPriceProvider for TwseProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError> {
        let body = self
            .client
            .get(&self.url)
            .query(&[("response", "json"), ("stockNo", ticker)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_latest_close(ticker, &body)
    }
}
