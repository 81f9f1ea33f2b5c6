use async_trait::async_trait;

use crate::errors::CoreError;

/// Source of the live USD → TWD exchange rate.
///
/// Implementations are swappable behind this trait; the rest of the
/// codebase only sees a rate.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// How many New Taiwan dollars one US dollar buys right now.
    async fn usd_twd_rate(&self) -> Result<f64, CoreError>;
}

/// Source of per-ticker stock prices.
#[async_trait]
pub trait StockPriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Closing price of the most recent trading day for `ticker`.
    async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError>;
}
