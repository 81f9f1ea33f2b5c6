use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maximum length of a stock ticker.
pub const TICKER_MAX_LEN: usize = 10;

/// A single stock purchase.
///
/// Transactions sharing a ticker form the append-only history of that
/// ticker's position. There is no sell path: `share_count` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// System-assigned identifier
    pub id: i64,

    /// Ticker code, trimmed and uppercased (e.g., "2330", "0050")
    pub stock_ticker: String,

    /// Number of shares bought
    pub share_count: i64,

    /// Price paid per share
    pub unit_price: f64,

    /// Broker fee, whole units
    pub processing_fee: i64,

    /// Transaction tax, whole units
    pub tax: i64,

    pub date: NaiveDate,
}

impl StockTransaction {
    /// Share cost without frictions: `share_count × unit_price`.
    pub fn share_cost(&self) -> f64 {
        self.share_count as f64 * self.unit_price
    }

    /// Cost basis of this transaction: share cost plus fee and tax.
    pub fn total_cost(&self) -> f64 {
        self.share_cost() + self.processing_fee as f64 + self.tax as f64
    }
}

/// Payload for inserting a new stock transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStockTransaction {
    pub stock_ticker: String,
    pub share_count: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub processing_fee: i64,
    #[serde(default)]
    pub tax: i64,
    pub date: NaiveDate,
}

impl NewStockTransaction {
    /// Build a purchase with no fee and no tax. The ticker is normalized.
    pub fn new(
        stock_ticker: impl Into<String>,
        share_count: i64,
        unit_price: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            stock_ticker: normalize_ticker(&stock_ticker.into()),
            share_count,
            unit_price,
            processing_fee: 0,
            tax: 0,
            date,
        }
    }

    pub fn with_frictions(mut self, processing_fee: i64, tax: i64) -> Self {
        self.processing_fee = processing_fee;
        self.tax = tax;
        self
    }

    /// Validate the payload before it reaches the ledger.
    ///
    /// A zero share count is rejected here so that no ticker group can ever
    /// sum to zero shares downstream.
    pub fn validate(&self) -> Result<(), CoreError> {
        let ticker = self.stock_ticker.trim();
        if ticker.is_empty() {
            return Err(CoreError::ValidationError("Stock ticker must not be empty".into()));
        }
        if ticker.chars().count() > TICKER_MAX_LEN {
            return Err(CoreError::ValidationError(format!(
                "Stock ticker '{ticker}' is longer than {TICKER_MAX_LEN} characters"
            )));
        }
        if self.share_count <= 0 {
            return Err(CoreError::ValidationError(format!(
                "Share count must be positive, got {}",
                self.share_count
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Unit price must be a non-negative number, got {}",
                self.unit_price
            )));
        }
        if self.processing_fee < 0 {
            return Err(CoreError::ValidationError(format!(
                "Processing fee must not be negative, got {}",
                self.processing_fee
            )));
        }
        if self.tax < 0 {
            return Err(CoreError::ValidationError(format!(
                "Tax must not be negative, got {}",
                self.tax
            )));
        }
        Ok(())
    }
}

/// Trim surrounding whitespace and uppercase a ticker code.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}
