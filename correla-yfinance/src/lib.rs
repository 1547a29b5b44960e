//! correla-yfinance
//!
//! Daily closing prices from Yahoo Finance, exposed as a `PriceHistorySource`.
//! Requests are always daily with an explicit period; no quotes, actions or
//! intraday data are requested.
#![warn(missing_docs)]

/// The fetcher seam and its `yfinance-rs` implementation.
pub mod adapter;

use std::sync::Arc;

use adapter::{DailyHistory, SOURCE_NAME, YahooClient, YahooRequest};
use async_trait::async_trait;
use correla_core::{CorrelaError, HistoryRequest, HistoryResponse, Instrument, PriceHistorySource};

/// Yahoo Finance price source.
pub struct YfPriceSource {
    fetcher: Arc<dyn DailyHistory>,
}

impl YfPriceSource {
    /// Source backed by a freshly built Yahoo client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or `YfClient` cannot be constructed.
    pub fn try_new_default() -> Result<Self, CorrelaError> {
        Ok(Self::with_fetcher(Arc::new(YahooClient::try_new_default()?)))
    }

    /// Source over an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        Self::with_fetcher(Arc::new(YahooClient::from_client(client)))
    }

    /// Source over a caller-built `reqwest::Client` (keep its cookie store enabled).
    ///
    /// # Errors
    /// Returns an error if the `YfClient` cannot be built on top of `http`.
    pub fn try_new_with_reqwest_client(http: reqwest::Client) -> Result<Self, CorrelaError> {
        Ok(Self::with_fetcher(Arc::new(YahooClient::with_http(http)?)))
    }

    /// Source over an injected fetcher.
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(fetcher: Arc<dyn DailyHistory>) -> Self {
        Self::with_fetcher(fetcher)
    }

    fn with_fetcher(fetcher: Arc<dyn DailyHistory>) -> Self {
        Self { fetcher }
    }
}

/// Yahoo reports some empty periods as generic failures; recognise them by message.
fn means_no_data(msg: &str) -> bool {
    let m = msg.to_ascii_lowercase();
    ["not found", "no data", "no matches"]
        .iter()
        .any(|needle| m.contains(needle))
}

fn normalize(err: CorrelaError, symbol: &str) -> CorrelaError {
    match err {
        CorrelaError::Connector { msg, .. } if means_no_data(&msg) => {
            CorrelaError::not_found(format!("history for {symbol}"))
        }
        CorrelaError::Connector { msg, .. } | CorrelaError::Other(msg) => {
            CorrelaError::connector(SOURCE_NAME, msg)
        }
        other => other,
    }
}

fn to_yahoo(req: &HistoryRequest) -> YahooRequest {
    YahooRequest {
        range: req.range(),
        period: req.period().map(|(s, e)| (s.timestamp(), e.timestamp())),
        interval: req.interval(),
        include_prepost: req.include_prepost(),
        include_actions: req.include_actions(),
        auto_adjust: req.auto_adjust(),
        keepna: req.keepna(),
    }
}

#[async_trait]
impl PriceHistorySource for YfPriceSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "correla_yfinance::history",
            skip(self, instrument, req),
            fields(symbol = %instrument.symbol()),
        )
    )]
    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, CorrelaError> {
        let symbol = instrument.symbol_str();
        self.fetcher
            .fetch(symbol, to_yahoo(&req))
            .await
            .map_err(|e| normalize(e, symbol))
    }
}
