use std::path::{Path, PathBuf};

use crate::CorrelaError;
use crate::series::AlignedTable;
use crate::stats::correlation::CorrelationMatrix;

/// File name of the focus-pair scatter chart.
pub const SCATTER_FILE: &str = "tvl_vs_usdt_scatter.png";
/// File name of the correlation heatmap.
pub const HEATMAP_FILE: &str = "correlation_heatmap.png";
/// File name of the metric trend chart.
pub const TRENDS_FILE: &str = "metrics_trends.png";

/// One chart request handed to a [`ChartRenderer`].
#[derive(Debug, Clone, Copy)]
pub enum Chart<'a> {
    /// Column `y` plotted against column `x`, one point per complete row.
    Scatter {
        /// Source table.
        table: &'a AlignedTable,
        /// Label of the horizontal-axis column.
        x: &'a str,
        /// Label of the vertical-axis column.
        y: &'a str,
    },
    /// Correlation matrix cells.
    Heatmap {
        /// Matrix to paint.
        matrix: &'a CorrelationMatrix,
    },
    /// One line per listed column over the table dates.
    Trends {
        /// Source table.
        table: &'a AlignedTable,
        /// Labels of the plotted columns, in drawing order.
        columns: &'a [String],
    },
}

impl Chart<'_> {
    /// Fixed output file name for this chart kind.
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Scatter { .. } => SCATTER_FILE,
            Self::Heatmap { .. } => HEATMAP_FILE,
            Self::Trends { .. } => TRENDS_FILE,
        }
    }
}

/// Turns chart requests into files.
///
/// Render failures never affect the analysis; callers log and list them.
pub trait ChartRenderer: Send + Sync {
    /// Renderer name, used in logs.
    fn name(&self) -> &'static str;

    /// Render `chart` into `out_dir` under [`Chart::file_name`] and return the written path.
    ///
    /// # Errors
    /// Returns `Render` if the chart inputs are unusable or the file cannot be written.
    fn render(&self, chart: &Chart<'_>, out_dir: &Path) -> Result<PathBuf, CorrelaError>;
}
