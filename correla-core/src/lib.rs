//! correla-core
//!
//! Core types, traits, and algorithms shared across the correla workspace.
//!
//! - `series`: the primary table, the secondary price series and the aligned table.
//! - `align`: exact-date alignment of the secondary series onto the primary dates.
//! - `stats`: pairwise-complete Pearson correlation and Shapiro-Wilk normality.
//! - `source`: the `PriceHistorySource` and `PrimarySource` traits.
//! - `render`: the `ChartRenderer` trait and the fixed chart file names.
//! - `timeseries`: conversion of provider history into daily series.
//!
//! Missing values are always `Option<f64>::None`; no NaN sentinels are used.
//!
//! Optional features
//! -----------------
//! - `dataframe`: `AlignedTable::to_dataframe` via `polars`.
//! - `tracing`: instrumentation hooks.
#![warn(missing_docs)]

/// Exact-date alignment.
pub mod align;
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// Chart requests and the renderer trait.
pub mod render;
/// Primary, secondary and aligned series model.
pub mod series;
/// Source traits implemented by connectors and datasets.
pub mod source;
pub mod stats;
/// Provider history to daily series conversion.
pub mod timeseries;
pub mod types;

pub use align::align;
pub use render::{Chart, ChartRenderer, HEATMAP_FILE, SCATTER_FILE, TRENDS_FILE};
pub use series::{
    AlignedTable, Column, DATE_FORMAT, PrimaryRecord, PrimarySeries, SecondarySeries, parse_date,
};
pub use source::{PriceHistorySource, PrimarySource};
pub use stats::correlation::{CorrelationMatrix, correlation_matrix, pearson};
pub use stats::normality::{NormalityTest, shapiro_wilk, shapiro_wilk_present};
pub use timeseries::daily::{calendar_date, daily_closes, daily_request};
pub use types::*;
