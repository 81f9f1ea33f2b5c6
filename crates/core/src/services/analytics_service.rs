use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::analytics::{PortfolioSnapshot, Position};
use crate::models::cash::CashEntry;
use crate::models::stock::StockTransaction;
use crate::services::currency_service::CurrencyService;
use crate::services::portfolio_service::{round_dp, PortfolioService};

/// Values the ledger: cash totals, per-ticker positions, returns and
/// market value shares.
///
/// `aggregate` is a pure function of its inputs. Market data is fetched by
/// the caller, so a snapshot can be computed without a network or database.
pub struct AnalyticsService {
    portfolio_service: PortfolioService,
    currency_service: CurrencyService,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {
            portfolio_service: PortfolioService::new(),
            currency_service: CurrencyService::new(),
        }
    }

    /// Build a portfolio snapshot.
    ///
    /// Computes:
    /// - NTD and USD cash totals, and the USD total floored into NTD
    /// - One position per open ticker, valued at `prices[ticker]`
    /// - Return on investment per position (0 when the cost basis is 0)
    /// - Share of total market value per position (0 when the total is 0)
    ///
    /// Fails with `PriceNotAvailable` when an open ticker has no price, and
    /// with `ValidationError` when a cash or share total overflows.
    pub fn aggregate(
        &self,
        cash_entries: &[CashEntry],
        transactions: &[StockTransaction],
        exchange_rate: f64,
        prices: &HashMap<String, f64>,
    ) -> Result<PortfolioSnapshot, CoreError> {
        // 1. Cash
        let cash = self.portfolio_service.cash_totals(cash_entries)?;
        let usd_to_ntd_value = self
            .currency_service
            .usd_to_ntd(cash.usd_total, exchange_rate)?;

        // 2. Value each open position
        let mut positions = Vec::new();
        for basis in self.portfolio_service.group_positions(transactions)? {
            let current_price = prices
                .get(&basis.ticker)
                .copied()
                .ok_or_else(|| CoreError::PriceNotAvailable {
                    ticker: basis.ticker.clone(),
                })?;

            let current_market_value = round_dp(basis.total_shares as f64 * current_price, 2);
            let return_on_investment = if basis.total_cost != 0.0 {
                let fraction =
                    round_dp((current_market_value - basis.total_cost) / basis.total_cost, 4);
                round_dp(fraction * 100.0, 2)
            } else {
                0.0
            };

            positions.push(Position {
                ticker: basis.ticker,
                total_shares: basis.total_shares,
                total_cost: basis.total_cost,
                average_cost: basis.average_cost,
                current_price,
                current_market_value,
                return_on_investment,
                market_value_share: 0.0, // filled below
            });
        }

        // 3. Shares of the total
        let total_market_value: f64 = positions.iter().map(|p| p.current_market_value).sum();
        if total_market_value != 0.0 {
            for position in &mut positions {
                position.market_value_share =
                    round_dp(position.current_market_value / total_market_value * 100.0, 2);
            }
        }

        Ok(PortfolioSnapshot {
            ntd_total: cash.ntd_total,
            usd_total: cash.usd_total,
            usd_to_ntd_value,
            exchange_rate,
            positions,
            total_market_value,
        })
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
