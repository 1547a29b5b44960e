//! Fixture-backed price sources for tests and demos.
//!
//! - [`MockPriceSource`] serves static daily closes for a handful of symbols and
//!   has two magic symbols: `FAIL` errors and `TIMEOUT` stalls briefly.
//! - [`ScriptedPriceSource`] defers every call to a test-controlled script.
use async_trait::async_trait;
use correla_core::{CorrelaError, HistoryRequest, HistoryResponse, Instrument, PriceHistorySource};

mod dynamic;
mod fixtures;

pub use dynamic::{HistoryCall, MockBehavior, ScriptedController, ScriptedPriceSource};

/// Delay applied to the `TIMEOUT` symbol.
pub const TIMEOUT_DELAY: std::time::Duration = std::time::Duration::from_millis(200);

/// Mock source for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockPriceSource;

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(symbol: &str) -> Result<(), CorrelaError> {
        match symbol {
            "FAIL" => Err(CorrelaError::connector(
                "correla-mock",
                "forced failure: history",
            )),
            "TIMEOUT" => {
                // long enough to trip a short provider timeout in tests
                tokio::time::sleep(TIMEOUT_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Keep only the candles inside the request's period, if it has one.
///
/// The period is half-open: `start <= ts < end`.
#[must_use]
pub fn restrict_to_period(mut resp: HistoryResponse, req: &HistoryRequest) -> HistoryResponse {
    if let Some((start, end)) = req.period() {
        resp.candles.retain(|c| c.ts >= start && c.ts < end);
    }
    resp
}

#[async_trait]
impl PriceHistorySource for MockPriceSource {
    fn name(&self) -> &'static str {
        "correla-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, CorrelaError> {
        let s = instrument.symbol_str();
        Self::maybe_fail_or_timeout(s).await?;
        let full = fixtures::history::by_symbol(s)
            .ok_or_else(|| CorrelaError::not_found(format!("history for {s}")))?;
        Ok(restrict_to_period(full, &req))
    }
}
