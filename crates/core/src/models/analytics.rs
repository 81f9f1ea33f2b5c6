use serde::{Deserialize, Serialize};

/// Sums over all cash entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashTotals {
    /// Sum of all New Taiwan dollar amounts (0 when there are no entries)
    pub ntd_total: i64,

    /// Sum of all US dollar amounts (0 when there are no entries)
    pub usd_total: f64,
}

/// Cost side of a position, computed from the ledger alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBasis {
    pub ticker: String,

    /// Sum of share counts over the ticker's transactions
    pub total_shares: i64,

    /// Sum of share cost plus processing fees and taxes
    pub total_cost: f64,

    /// Share cost divided by total shares, rounded to 2 decimals.
    /// Fees and taxes are excluded.
    pub average_cost: f64,
}

/// Aggregated holding in one ticker, valued at the latest price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub total_shares: i64,
    pub total_cost: f64,
    pub average_cost: f64,

    /// Closing price of the most recent trading day
    pub current_price: f64,

    /// `total_shares × current_price`, rounded to 2 decimals
    pub current_market_value: f64,

    /// Return on investment in percent, rounded to 2 decimals
    pub return_on_investment: f64,

    /// This position's share of the total stock market value, in percent
    pub market_value_share: f64,
}

/// Valuation of the whole ledger at one point in time.
///
/// Derived on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub ntd_total: i64,
    pub usd_total: f64,

    /// `floor(usd_total × exchange_rate)`
    pub usd_to_ntd_value: i64,

    /// USD → TWD rate used for this snapshot
    pub exchange_rate: f64,

    /// One entry per open ticker, sorted by ticker
    pub positions: Vec<Position>,

    /// Sum of all positions' market values
    pub total_market_value: f64,
}

impl PortfolioSnapshot {
    /// True when there is no cash and no stock value at all.
    ///
    /// Gated on the raw USD sum: a few cents that floor to 0 NTD still count.
    pub fn is_empty(&self) -> bool {
        self.ntd_total == 0 && self.usd_total == 0.0 && self.total_market_value == 0.0
    }
}
