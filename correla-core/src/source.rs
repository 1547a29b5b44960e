use async_trait::async_trait;

use crate::series::PrimarySeries;
use crate::CorrelaError;
use paft::domain::Instrument;
use paft::market::requests::history::HistoryRequest;
use paft::market::responses::history::HistoryResponse;

/// A remote (or fixture) source of daily price history for the secondary series.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Human-readable source name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Upstream data vendor, if different from the source name.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Fetch OHLCV history for `instrument` over `req`.
    ///
    /// Implementations return `NotFound` when the instrument or period has no
    /// data and `Connector` for transport or upstream failures.
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, CorrelaError>;
}

/// Producer of the authoritative primary table.
pub trait PrimarySource: Send + Sync {
    /// Name of the dataset, used in logs and the report header.
    fn name(&self) -> &str;

    /// Build the primary series.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the underlying data is malformed.
    fn load(&self) -> Result<PrimarySeries, CorrelaError>;
}
