use serde::{Deserialize, Serialize};

/// Which of the two dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Market value per ticker
    StockComposition,
    /// USD cash (in NTD), NTD cash and total stock value
    AssetComposition,
}

impl ChartKind {
    /// File name of the rendered chart inside the chart directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::StockComposition => "stock_composition.svg",
            ChartKind::AssetComposition => "asset_composition.svg",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::StockComposition => write!(f, "Stock composition"),
            ChartKind::AssetComposition => write!(f, "Asset composition"),
        }
    }
}

/// A labelled value in a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// A pie chart ready for rendering.
///
/// The core computes the series; a `ChartRenderer` only draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub kind: ChartKind,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}
