#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use correla_core::CorrelaError;
use yf::core::HistoryService;
use yfinance_rs as yf;

/// Name reported on connector errors raised by this crate.
pub const SOURCE_NAME: &str = "correla-yfinance";

/// Browser-like user agent; Yahoo rejects the default `reqwest` one.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Provider-level request type forwarded to Yahoo.
pub type YahooRequest = yf::core::services::HistoryRequest;

/// Daily candle fetcher sitting between [`crate::YfPriceSource`] and Yahoo.
#[async_trait]
pub trait DailyHistory: Send + Sync {
    /// Fetch candles for `symbol` over the period in `req`.
    async fn fetch(&self, symbol: &str, req: YahooRequest)
    -> Result<yf::HistoryResponse, CorrelaError>;
}

/// Production fetcher holding one `YfClient`.
#[derive(Clone)]
pub struct YahooClient {
    client: yf::YfClient,
}

impl YahooClient {
    /// Cookie-enabled HTTP client, no proxy, browser user agent.
    ///
    /// # Errors
    /// Returns `Other` if either client cannot be built.
    pub fn try_new_default() -> Result<Self, CorrelaError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .map_err(|e| CorrelaError::Other(format!("http client: {e}")))?;
        Self::with_http(http)
    }

    /// Wrap a caller-supplied HTTP client. It needs a cookie store for Yahoo's crumb.
    ///
    /// # Errors
    /// Returns `Other` if the `YfClient` cannot be built.
    pub fn with_http(http: reqwest::Client) -> Result<Self, CorrelaError> {
        yf::YfClient::builder()
            .custom_client(http)
            .user_agent(USER_AGENT)
            .build()
            .map(Self::from_client)
            .map_err(|e| CorrelaError::Other(format!("yfinance client: {e}")))
    }

    /// Use an already configured `YfClient`.
    #[must_use]
    pub const fn from_client(client: yf::YfClient) -> Self {
        Self { client }
    }
}

/// Sort a Yahoo failure into the workspace taxonomy: missing data is
/// `NotFound`, everything else a (retryable) connector error.
fn classify(err: &yf::YfError, symbol: &str) -> CorrelaError {
    let what = format!("history for {symbol}");
    let detail = match err {
        yf::YfError::NotFound { .. } => return CorrelaError::not_found(what),
        yf::YfError::RateLimited { .. } => format!("rate limited fetching {what}"),
        yf::YfError::ServerError { status, .. } => format!("HTTP {status} fetching {what}"),
        yf::YfError::Status { status, .. } => format!("HTTP {status} fetching {what}"),
        other => format!("{what}: {other}"),
    };
    CorrelaError::connector(SOURCE_NAME, detail)
}

#[async_trait]
impl DailyHistory for YahooClient {
    async fn fetch(
        &self,
        symbol: &str,
        req: YahooRequest,
    ) -> Result<yf::HistoryResponse, CorrelaError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| classify(&e, symbol))
    }
}

#[cfg(feature = "test-adapters")]
struct FnHistory<F>(F);

#[cfg(feature = "test-adapters")]
#[async_trait]
impl<F> DailyHistory for FnHistory<F>
where
    F: Fn(&str, YahooRequest) -> Result<yf::HistoryResponse, CorrelaError> + Send + Sync,
{
    async fn fetch(
        &self,
        symbol: &str,
        req: YahooRequest,
    ) -> Result<yf::HistoryResponse, CorrelaError> {
        (self.0)(symbol, req)
    }
}

/// Fetcher answering every call from a closure (tests only).
#[cfg(feature = "test-adapters")]
pub fn from_fn<F>(f: F) -> Arc<dyn DailyHistory>
where
    F: Fn(&str, YahooRequest) -> Result<yf::HistoryResponse, CorrelaError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHistory(f))
}
