//! Acquisition boundary for the secondary series.
//!
//! Every provider call is bounded by the provider timeout and retried on
//! transient failures with jittered exponential backoff. Whatever happens, the
//! outcome is an [`Acquisition`]: errors never escape this module.

use std::collections::BTreeMap;
use std::time::Duration;

use correla_core::{
    AcquisitionMode, AssetKind, CorrelaError, HistoryRequest, HistoryResponse, Instrument,
    PrimarySeries, SecondarySeries, daily_request,
};

use crate::backoff::jitter_wait;
use crate::core::{Correla, join_with_deadline};

/// Outcome of fetching the secondary series.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// The series was fetched. It may still lack some primary dates.
    Present(SecondarySeries),
    /// Nothing usable was fetched; the aligned column will be entirely missing.
    Absent {
        /// Human-readable cause, for the run report.
        reason: String,
    },
}

impl Acquisition {
    /// The fetched series, if any.
    #[must_use]
    pub const fn series(&self) -> Option<&SecondarySeries> {
        match self {
            Self::Present(s) => Some(s),
            Self::Absent { .. } => None,
        }
    }

    /// True if a series was fetched.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Diagnostic line for the report when the series is absent.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Present(_) => None,
            Self::Absent { reason } => Some(format!(
                "secondary series unavailable ({reason}); continuing without it"
            )),
        }
    }
}

/// Inclusive date bounds of the primary table.
fn date_bounds(primary: &PrimarySeries) -> (chrono::NaiveDate, chrono::NaiveDate) {
    let mut dates = primary.dates();
    let first = dates.next().unwrap_or_default();
    dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))
}

impl Correla {
    /// Fetch the secondary series for the dates of `primary`.
    ///
    /// Never fails: any error is logged and turned into [`Acquisition::Absent`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "correla::acquire",
            skip(self, primary),
            fields(
                source = self.source.name(),
                symbol = %self.cfg.secondary.symbol,
                mode = ?self.cfg.acquisition,
            ),
        )
    )]
    pub async fn acquire(&self, primary: &PrimarySeries) -> Acquisition {
        let result = match self.cfg.acquisition {
            AcquisitionMode::Span => self.acquire_span(primary).await,
            AcquisitionMode::PerDate => self.acquire_per_date(primary).await,
        };
        match result {
            Ok(series) => {
                #[cfg(feature = "tracing")]
                tracing::info!(points = series.len(), "secondary series acquired");
                Acquisition::Present(series)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "secondary series unavailable; continuing without it");
                Acquisition::Absent {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn instrument(&self) -> Result<Instrument, CorrelaError> {
        Ok(Instrument::from_symbol(
            &self.cfg.secondary.symbol,
            AssetKind::Crypto,
        )?)
    }

    fn to_series(&self, resp: &HistoryResponse) -> Result<SecondarySeries, CorrelaError> {
        let sec = &self.cfg.secondary;
        SecondarySeries::from_history(sec.symbol.as_str(), sec.label.as_str(), resp)
    }

    async fn acquire_span(&self, primary: &PrimarySeries) -> Result<SecondarySeries, CorrelaError> {
        let instrument = self.instrument()?;
        let (first, last) = date_bounds(primary);
        let resp = self
            .history_with_retry(&instrument, daily_request(first, last)?)
            .await?;
        if resp.candles.is_empty() {
            return Err(CorrelaError::not_found(format!(
                "history for {} between {first} and {last}",
                self.cfg.secondary.symbol
            )));
        }
        self.to_series(&resp)
    }

    async fn acquire_per_date(
        &self,
        primary: &PrimarySeries,
    ) -> Result<SecondarySeries, CorrelaError> {
        let instrument = self.instrument()?;
        let requests = primary
            .dates()
            .map(|d| daily_request(d, d).map(|req| (d, req)))
            .collect::<Result<Vec<_>, _>>()?;

        let tasks = requests.into_iter().map(|(date, req)| {
            let instrument = &instrument;
            async move { (date, self.history_with_retry(instrument, req).await) }
        });
        let results = join_with_deadline(tasks, self.cfg.request_timeout, "history").await?;

        let sec = &self.cfg.secondary;
        let mut merged =
            SecondarySeries::new(sec.symbol.as_str(), sec.label.as_str(), BTreeMap::new());
        for (date, result) in results {
            match result {
                Ok(resp) if !resp.candles.is_empty() => merged.merge_from(self.to_series(&resp)?),
                Ok(_) | Err(CorrelaError::NotFound { .. }) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%date, "no secondary data for date");
                    #[cfg(not(feature = "tracing"))]
                    let _ = date;
                }
                Err(e) => return Err(e),
            }
        }

        if merged.is_empty() {
            return Err(CorrelaError::not_found(format!(
                "history for {} on any primary date",
                sec.symbol
            )));
        }
        Ok(merged)
    }

    /// One provider call under the provider timeout, retried while the error is transient.
    async fn history_with_retry(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, CorrelaError> {
        let retry = self.cfg.retry;
        let attempts = retry.attempts.max(1);
        let mut attempt: u32 = 1;
        loop {
            let result = Self::provider_call_with_timeout(
                self.source.name(),
                "history",
                self.cfg.provider_timeout,
                self.source.history(instrument, req.clone()),
            )
            .await;
            match result {
                Err(e) if e.is_transient() && attempt < attempts => {
                    let wait = jitter_wait(
                        retry.backoff.delay_ms(attempt - 1),
                        u32::from(retry.backoff.jitter_percent),
                    );
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempt,
                        attempts,
                        wait_ms = wait,
                        error = %e,
                        "transient provider failure; retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
