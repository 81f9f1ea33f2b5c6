use serde::{Deserialize, Serialize};

use super::analytics::PortfolioSnapshot;
use super::cash::CashEntry;
use super::stock::StockTransaction;

/// Everything the dashboard view shows.
///
/// The chart flags tell the presentation layer whether each chart file
/// exists after this view's rendering pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub snapshot: PortfolioSnapshot,

    /// All cash entries, oldest first
    pub cash_entries: Vec<CashEntry>,

    /// All stock transactions, oldest first
    pub stock_transactions: Vec<StockTransaction>,

    pub show_stock_chart: bool,
    pub show_asset_chart: bool,
}
