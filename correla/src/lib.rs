//! Correla aligns a fixed table of Ethereum ecosystem metrics with Bitcoin
//! closing prices fetched from a market-data source, then reports
//! correlations and normality checks and renders charts.
//!
//! Overview
//! - The primary table (a [`PrimarySource`]) drives the row dates.
//! - The secondary series is fetched through a [`PriceHistorySource`] behind an
//!   acquisition boundary: provider timeout, retries with jittered backoff, and
//!   degradation to an all-missing column when nothing usable comes back.
//! - Alignment is by exact calendar date only. Missing cells are `None`.
//! - Analysis is a pairwise-complete Pearson matrix, a focus-pair correlation,
//!   and Shapiro-Wilk checks on configured columns.
//! - Charts are drawn by an optional [`ChartRenderer`]; their failures are
//!   reported, never fatal.
//!
//! Key behaviors and trade-offs
//! - Acquisition mode:
//!   - `Span`: one request over the whole primary range; fewest calls, but a
//!     single failure leaves the whole column missing.
//!   - `PerDate`: one request per primary date, joined concurrently under the
//!     optional request deadline; dates without data simply stay missing.
//! - Only transient errors (connector failures, timeouts) are retried.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use correla::{ConsoleReporter, Correla};
//!
//! let correla = Correla::builder()
//!     .with_source(Arc::new(correla_mock::MockPriceSource::new()))
//!     .build()?;
//! let summary = correla.run(&mut ConsoleReporter::stdout()).await?;
//! assert_eq!(summary.table.len(), 5);
//! ```
#![warn(missing_docs)]

mod acquire;
mod analysis;
mod backoff;
mod core;
mod datasets;
mod report;
mod run;

pub use crate::acquire::Acquisition;
pub use crate::analysis::{AnalysisReport, FocusCorrelation, NormalityOutcome, analyze};
pub use crate::core::{Correla, CorrelaBuilder};
pub use crate::datasets::{EthereumDataset, EthereumMetrics};
pub use crate::report::{ConsoleReporter, Reporter, RunSummary};
pub use crate::run::Prepared;

pub use correla_core::{
    AcquisitionMode, AlignedTable, BackoffConfig, Chart, ChartRenderer, CorrelaConfig,
    CorrelaError, CorrelationMatrix, NormalityTest, PriceHistorySource, PrimarySeries,
    PrimarySource, RetryConfig, SecondaryConfig, SecondarySeries, labels,
};
