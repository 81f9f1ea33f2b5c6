use crate::errors::CoreError;
use crate::models::settings::{MarketSettings, PriceSource};

use super::rter::RterProvider;
use super::traits::{ExchangeRateProvider, StockPriceProvider};
use super::twse::TwseProvider;
use super::yahoo_finance::YahooFinanceProvider;

/// The pair of providers a dashboard view talks to.
///
/// Exactly one provider per concern. A failing provider is a failing
/// view; there is no fallback chain.
pub struct ProviderRegistry {
    exchange_rate: Box<dyn ExchangeRateProvider>,
    stock_price: Box<dyn StockPriceProvider>,
}

impl ProviderRegistry {
    pub fn new(
        exchange_rate: Box<dyn ExchangeRateProvider>,
        stock_price: Box<dyn StockPriceProvider>,
    ) -> Self {
        Self {
            exchange_rate,
            stock_price,
        }
    }

    /// Build the live providers selected by `settings`.
    pub fn from_settings(settings: &MarketSettings) -> Result<Self, CoreError> {
        let stock_price: Box<dyn StockPriceProvider> = match settings.price_source {
            PriceSource::Twse => Box::new(TwseProvider::new()),
            PriceSource::Yahoo => Box::new(YahooFinanceProvider::new(settings.yahoo_suffix.clone())?),
        };
        let exchange_rate = RterProvider::new();
        log::info!(
            "Market data: exchange rate from {}, stock prices from {}",
            exchange_rate.name(),
            stock_price.name()
        );
        Ok(Self::new(Box::new(exchange_rate), stock_price))
    }

    pub fn exchange_rate_provider(&self) -> &dyn ExchangeRateProvider {
        self.exchange_rate.as_ref()
    }

    pub fn stock_price_provider(&self) -> &dyn StockPriceProvider {
        self.stock_price.as_ref()
    }
}
