pub mod svg;

use crate::errors::CoreError;
use crate::models::chart::{ChartKind, PieChart};

/// Draws pie charts to wherever the dashboard reads them from.
pub trait ChartRenderer: Send + Sync {
    /// Write `chart` for `kind`, or remove the existing output when `chart`
    /// is `None`. Returns whether the output exists afterwards.
    ///
    /// Removing output that does not exist is not an error.
    fn render(&self, kind: ChartKind, chart: Option<&PieChart>) -> Result<bool, CoreError>;
}
