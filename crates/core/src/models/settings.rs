use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Where per-ticker closing prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Taiwan Stock Exchange daily trading report
    Twse,
    /// Yahoo Finance daily quotes
    Yahoo,
}

impl std::fmt::Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSource::Twse => write!(f, "twse"),
            PriceSource::Yahoo => write!(f, "yahoo"),
        }
    }
}

impl std::str::FromStr for PriceSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twse" => Ok(PriceSource::Twse),
            "yahoo" => Ok(PriceSource::Yahoo),
            other => Err(CoreError::ValidationError(format!(
                "Unknown price source '{other}': expected 'twse' or 'yahoo'"
            ))),
        }
    }
}

/// Market data settings used to build the provider set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSettings {
    pub price_source: PriceSource,

    /// Appended to tickers when querying Yahoo Finance (e.g., "2330" → "2330.TW").
    pub yahoo_suffix: String,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            price_source: PriceSource::Twse,
            yahoo_suffix: ".TW".to_string(),
        }
    }
}
