use crate::errors::CoreError;
use crate::models::analytics::PortfolioSnapshot;
use crate::models::chart::{ChartKind, PieChart, PieSlice};
use crate::render::ChartRenderer;

/// Generates the dashboard's pie-chart series from a snapshot.
///
/// The core computes all the numbers; a `ChartRenderer` only draws them.
/// A series that is empty or sums to zero yields `None`, which tells the
/// renderer to remove the stale chart file.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Market value per ticker.
    pub fn stock_composition(&self, snapshot: &PortfolioSnapshot) -> Option<PieChart> {
        if snapshot.positions.is_empty() || snapshot.total_market_value <= 0.0 {
            return None;
        }
        let slices = snapshot
            .positions
            .iter()
            .map(|p| PieSlice {
                label: p.ticker.clone(),
                value: p.current_market_value,
            })
            .collect();
        Some(PieChart {
            kind: ChartKind::StockComposition,
            slices,
        })
    }

    /// USD cash (converted to NTD), NTD cash and total stock value.
    ///
    /// The USD slice is `usd_total × exchange_rate` before flooring, so small
    /// USD holdings still get a visible slice.
    pub fn asset_composition(&self, snapshot: &PortfolioSnapshot) -> Option<PieChart> {
        if snapshot.is_empty() {
            return None;
        }
        Some(PieChart {
            kind: ChartKind::AssetComposition,
            slices: vec![
                PieSlice {
                    label: "USD".into(),
                    value: snapshot.usd_total * snapshot.exchange_rate,
                },
                PieSlice {
                    label: "TWD".into(),
                    value: snapshot.ntd_total as f64,
                },
                PieSlice {
                    label: "Stock".into(),
                    value: snapshot.total_market_value,
                },
            ],
        })
    }

    /// Render (or remove) both charts for `snapshot`.
    /// Returns whether the stock chart and the asset chart exist afterwards.
    pub fn render_all(
        &self,
        renderer: &dyn ChartRenderer,
        snapshot: &PortfolioSnapshot,
    ) -> Result<(bool, bool), CoreError> {
        let stock = renderer.render(
            ChartKind::StockComposition,
            self.stock_composition(snapshot).as_ref(),
        )?;
        let asset = renderer.render(
            ChartKind::AssetComposition,
            self.asset_composition(snapshot).as_ref(),
        )?;
        Ok((stock, asset))
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
