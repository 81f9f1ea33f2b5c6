use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::analytics::{CashTotals, PositionBasis};
use crate::models::cash::CashEntry;
use crate::models::stock::StockTransaction;

/// Ledger arithmetic: cash sums and per-ticker cost bases.
///
/// No I/O and no network access.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Sum NTD and USD over all cash entries. Both are 0 for an empty slice.
    ///
    /// Fails with `ValidationError` when the NTD sum does not fit in an `i64`.
    pub fn cash_totals(&self, entries: &[CashEntry]) -> Result<CashTotals, CoreError> {
        let mut totals = CashTotals::default();
        for e in entries {
            totals.ntd_total = totals
                .ntd_total
                .checked_add(e.taiwanese_dollars)
                .ok_or_else(|| {
                    CoreError::ValidationError(format!(
                        "NTD total overflows at cash entry {}",
                        e.id
                    ))
                })?;
            totals.usd_total += e.us_dollars;
        }
        Ok(totals)
    }

    /// Group transactions by ticker and compute each group's cost basis.
    ///
    /// Groups come back sorted by ticker. Groups whose share total is not
    /// positive are closed positions and are left out. A share total that
    /// does not fit in an `i64` is a `ValidationError`.
    pub fn group_positions(
        &self,
        transactions: &[StockTransaction],
    ) -> Result<Vec<PositionBasis>, CoreError> {
        let mut groups: BTreeMap<&str, GroupSums> = BTreeMap::new();
        for tx in transactions {
            let sums = groups.entry(tx.stock_ticker.as_str()).or_default();
            sums.shares = sums.shares.checked_add(tx.share_count).ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Share total for {} overflows at transaction {}",
                    tx.stock_ticker, tx.id
                ))
            })?;
            sums.share_cost += tx.share_cost();
            sums.total_cost += tx.total_cost();
        }

        let positions = groups
            .into_iter()
            .filter_map(|(ticker, sums)| {
                if sums.shares <= 0 {
                    log::warn!(
                        "Skipping {ticker}: share total is {} (closed position)",
                        sums.shares
                    );
                    return None;
                }
                Some(PositionBasis {
                    ticker: ticker.to_string(),
                    total_shares: sums.shares,
                    total_cost: sums.total_cost,
                    average_cost: round_dp(sums.share_cost / sums.shares as f64, 2),
                })
            })
            .collect();
        Ok(positions)
    }

    /// Distinct tickers of all open positions, sorted.
    pub fn open_tickers(&self, transactions: &[StockTransaction]) -> Result<Vec<String>, CoreError> {
        Ok(self
            .group_positions(transactions)?
            .into_iter()
            .map(|basis| basis.ticker)
            .collect())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct GroupSums {
    shares: i64,
    share_cost: f64,
    total_cost: f64,
}

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}
