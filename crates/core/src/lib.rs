pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;
pub mod storage;

use models::{
    analytics::PortfolioSnapshot,
    cash::{CashEntry, NewCashEntry},
    portfolio::Dashboard,
    settings::MarketSettings,
    stock::{NewStockTransaction, StockTransaction},
};
use providers::registry::ProviderRegistry;
use render::{svg::SvgChartRenderer, ChartRenderer};
use services::{
    analytics_service::AnalyticsService, chart_service::ChartService,
    market_data_service::MarketDataService, portfolio_service::PortfolioService,
};
use std::path::PathBuf;
use storage::ledger::LedgerStore;

use errors::CoreError;

/// Main entry point for the Finance Tracker core library.
/// Owns the ledger handle, the market data providers and the chart renderer.
#[must_use]
pub struct FinanceTracker {
    ledger: LedgerStore,
    market_data: MarketDataService,
    renderer: Box<dyn ChartRenderer>,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
    chart_service: ChartService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}

/// Intermediate result of one valuation pass.
struct Valuation {
    snapshot: PortfolioSnapshot,
    cash_entries: Vec<CashEntry>,
    stock_transactions: Vec<StockTransaction>,
}

impl FinanceTracker {
    /// Assemble a tracker from explicit parts (tests, alternative providers).
    pub fn new(
        ledger: LedgerStore,
        registry: ProviderRegistry,
        renderer: Box<dyn ChartRenderer>,
    ) -> Self {
        Self {
            ledger,
            market_data: MarketDataService::new(registry),
            renderer,
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Live providers chosen by `settings`, SVG charts written to `chart_dir`.
    pub fn from_settings(
        ledger: LedgerStore,
        settings: &MarketSettings,
        chart_dir: impl Into<PathBuf>,
    ) -> Result<Self, CoreError> {
        let registry = ProviderRegistry::from_settings(settings)?;
        let renderer = SvgChartRenderer::new(chart_dir);
        Ok(Self::new(ledger, registry, Box::new(renderer)))
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// Record a cash holding.
    pub async fn add_cash_entry(&self, entry: NewCashEntry) -> Result<CashEntry, CoreError> {
        self.ledger.insert_cash_entry(entry).await
    }

    /// Remove a cash entry by id. Unknown ids are a no-op (returns `false`).
    pub async fn delete_cash_entry(&self, id: i64) -> Result<bool, CoreError> {
        self.ledger.delete_cash_entry(id).await
    }

    pub async fn list_cash_entries(&self) -> Result<Vec<CashEntry>, CoreError> {
        self.ledger.list_cash_entries().await
    }

    // ── Stock ───────────────────────────────────────────────────────

    /// Record a stock purchase. Zero or negative share counts are rejected.
    pub async fn add_stock_transaction(
        &self,
        tx: NewStockTransaction,
    ) -> Result<StockTransaction, CoreError> {
        self.ledger.insert_stock_transaction(tx).await
    }

    /// Remove a stock transaction by id. Unknown ids are a no-op.
    pub async fn delete_stock_transaction(&self, id: i64) -> Result<bool, CoreError> {
        self.ledger.delete_stock_transaction(id).await
    }

    pub async fn list_stock_transactions(&self) -> Result<Vec<StockTransaction>, CoreError> {
        self.ledger.list_stock_transactions().await
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Value the ledger at live market prices. No charts are touched.
    pub async fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        Ok(self.valuate().await?.snapshot)
    }

    /// Value the ledger, refresh both chart files and collect everything
    /// the dashboard displays.
    pub async fn dashboard(&self) -> Result<Dashboard, CoreError> {
        let valuation = self.valuate().await?;
        let (show_stock_chart, show_asset_chart) = self
            .chart_service
            .render_all(self.renderer.as_ref(), &valuation.snapshot)?;

        Ok(Dashboard {
            snapshot: valuation.snapshot,
            cash_entries: valuation.cash_entries,
            stock_transactions: valuation.stock_transactions,
            show_stock_chart,
            show_asset_chart,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Read the ledger, fetch the rate once and each open ticker's price
    /// once, then aggregate.
    async fn valuate(&self) -> Result<Valuation, CoreError> {
        let cash_entries = self.ledger.list_cash_entries().await?;
        let stock_transactions = self.ledger.list_stock_transactions().await?;

        let exchange_rate = self.market_data.exchange_rate().await?;
        let tickers = self.portfolio_service.open_tickers(&stock_transactions)?;
        let prices = self.market_data.latest_prices(&tickers).await?;

        let snapshot = self.analytics_service.aggregate(
            &cash_entries,
            &stock_transactions,
            exchange_rate,
            &prices,
        )?;
        log::info!(
            "Valued {} cash entries and {} positions (total market value {:.2})",
            cash_entries.len(),
            snapshot.positions.len(),
            snapshot.total_market_value
        );

        Ok(Valuation {
            snapshot,
            cash_entries,
            stock_transactions,
        })
    }
}
