use std::collections::HashMap;

use crate::errors::CoreError;
use crate::providers::registry::ProviderRegistry;

/// Fetches live market data for one dashboard view.
///
/// No caching: every call goes to the providers. Any failure aborts the
/// whole request so a snapshot is never built from partial data.
pub struct MarketDataService {
    registry: ProviderRegistry,
}

impl MarketDataService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Current USD → TWD rate.
    pub async fn exchange_rate(&self) -> Result<f64, CoreError> {
        let provider = self.registry.exchange_rate_provider();
        log::debug!("Fetching USD/TWD rate from {}", provider.name());
        provider.usd_twd_rate().await.map_err(|e| {
            log::error!("Exchange rate lookup via {} failed: {e}", provider.name());
            e
        })
    }

    /// Latest closing price for every ticker, keyed by ticker.
    ///
    /// Lookups run one after another and stop at the first failure.
    /// Duplicate tickers are fetched once.
    pub async fn latest_prices(
        &self,
        tickers: &[String],
    ) -> Result<HashMap<String, f64>, CoreError> {
        let provider = self.registry.stock_price_provider();
        let mut prices = HashMap::with_capacity(tickers.len());

        for ticker in tickers {
            if prices.contains_key(ticker) {
                continue;
            }
            log::debug!("Fetching latest close for {ticker} from {}", provider.name());
            let price = provider.latest_close(ticker).await.map_err(|e| {
                log::error!("Price lookup for {ticker} via {} failed: {e}", provider.name());
                e
            })?;
            prices.insert(ticker.clone(), price);
        }

        Ok(prices)
    }
}
