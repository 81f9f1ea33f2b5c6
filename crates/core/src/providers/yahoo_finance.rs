use async_trait::async_trait;

use crate::errors::CoreError;
use super::traits::StockPriceProvider;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance API provider for stock closing prices.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, including TWSE listings under the
///   `.TW` suffix (e.g., `2330.TW`).
///
/// Uses the `yahoo_finance_api` crate. Tickers are stored without an
/// exchange suffix, so the configured suffix is appended on every lookup.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    suffix: String,
}

impl YahooFinanceProvider {
    pub fn new(suffix: impl Into<String>) -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self {
            connector,
            suffix: suffix.into(),
        })
    }

    /// Yahoo symbol for a ledger ticker. Tickers that already carry a
    /// dot-suffix are passed through unchanged.
    pub fn yahoo_symbol(&self, ticker: &str) -> String {
        if self.suffix.is_empty() || ticker.contains('.') {
            ticker.to_string()
        } else {
            format!("{ticker}{}", self.suffix)
        }
    }
}

#[async_trait]
impl StockPriceProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError> {
        let symbol = self.yahoo_symbol(ticker);
        let resp = self
            .connector
            .get_latest_quotes(&symbol, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {symbol}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No quote data for {symbol}: {e}"),
        })?;

        Ok(quote.close)
    }
}
