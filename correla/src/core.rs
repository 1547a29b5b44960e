use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use correla_core::{
    AcquisitionMode, BackoffConfig, ChartRenderer, CorrelaConfig, CorrelaError, PriceHistorySource,
    PrimarySeries, PrimarySource, RetryConfig, SecondaryConfig,
};

use crate::datasets::EthereumMetrics;

/// Orchestrator that loads the primary table, acquires the secondary series,
/// aligns them and runs the analysis.
pub struct Correla {
    pub(crate) primary: Arc<dyn PrimarySource>,
    pub(crate) source: Arc<dyn PriceHistorySource>,
    pub(crate) renderer: Option<Arc<dyn ChartRenderer>>,
    pub(crate) cfg: CorrelaConfig,
}

/// Builder for constructing a `Correla` orchestrator with custom configuration.
pub struct CorrelaBuilder {
    primary: Arc<dyn PrimarySource>,
    source: Option<Arc<dyn PriceHistorySource>>,
    renderer: Option<Arc<dyn ChartRenderer>>,
    cfg: CorrelaConfig,
}

impl Default for CorrelaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelaBuilder {
    /// Create a new builder with defaults.
    ///
    /// - The primary table defaults to the five-year Ethereum dataset.
    /// - No price source is registered; one is required via [`Self::with_source`].
    /// - No renderer is registered; without one, runs produce no charts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: Arc::new(EthereumMetrics::five_year()),
            source: None,
            renderer: None,
            cfg: CorrelaConfig::default(),
        }
    }

    /// Replace the primary table source.
    #[must_use]
    pub fn with_primary(mut self, primary: Arc<dyn PrimarySource>) -> Self {
        self.primary = primary;
        self
    }

    /// Register the secondary price source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PriceHistorySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Register a chart renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ChartRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CorrelaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the secondary symbol and column label.
    #[must_use]
    pub fn secondary(mut self, symbol: impl Into<String>, label: impl Into<String>) -> Self {
        self.cfg.secondary = SecondaryConfig {
            symbol: symbol.into(),
            label: label.into(),
        };
        self
    }

    /// Select how the secondary series is requested.
    ///
    /// - `Span`: a single request over the whole primary date range.
    /// - `PerDate`: one request per primary date, joined concurrently.
    #[must_use]
    pub const fn acquisition(mut self, mode: AcquisitionMode) -> Self {
        self.cfg.acquisition = mode;
        self
    }

    /// Set the timeout applied to each provider call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for a per-date fan-out.
    ///
    /// When exceeded, the acquisition fails with `RequestTimeout` and the
    /// secondary series is treated as absent.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Set the retry policy for transient provider failures.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Set only the backoff schedule of the retry policy.
    #[must_use]
    pub const fn backoff(mut self, backoff: BackoffConfig) -> Self {
        self.cfg.retry.backoff = backoff;
        self
    }

    /// Set the significance level for normality verdicts.
    #[must_use]
    pub const fn normality_alpha(mut self, alpha: f64) -> Self {
        self.cfg.normality_alpha = alpha;
        self
    }

    /// Set the directory receiving rendered charts.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.output_dir = dir.into();
        self
    }

    /// Build the `Correla` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no price source was registered or the
    /// configuration fails validation.
    pub fn build(self) -> Result<Correla, CorrelaError> {
        let Some(source) = self.source else {
            return Err(CorrelaError::InvalidArg(
                "no price source registered; add one via with_source(...)".to_string(),
            ));
        };
        self.cfg.validate()?;
        Ok(Correla {
            primary: self.primary,
            source,
            renderer: self.renderer,
            cfg: self.cfg,
        })
    }
}

impl Correla {
    /// Start building a new `Correla` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use correla::{AcquisitionMode, ConsoleReporter, Correla, EthereumMetrics};
    ///
    /// let correla = Correla::builder()
    ///     .with_primary(Arc::new(EthereumMetrics::five_year()))
    ///     .with_source(Arc::new(correla_yfinance::YfPriceSource::try_new_default()?))
    ///     .with_renderer(Arc::new(correla_render::PngRenderer::new()))
    ///     .acquisition(AcquisitionMode::PerDate)
    ///     .build()?;
    /// let summary = correla.run(&mut ConsoleReporter::stdout()).await?;
    /// ```
    #[must_use]
    pub fn builder() -> CorrelaBuilder {
        CorrelaBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CorrelaConfig {
        &self.cfg
    }

    /// Load the primary table and check it leaves room for the secondary column.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the primary source rejects its data or already
    /// has a column named like the configured secondary label.
    pub fn load_primary(&self) -> Result<PrimarySeries, CorrelaError> {
        let primary = self.primary.load()?;
        let label = &self.cfg.secondary.label;
        if primary.metrics().iter().any(|m| m == label) {
            return Err(CorrelaError::InvalidArg(format!(
                "primary table '{}' already has a column named '{label}'",
                self.primary.name()
            )));
        }
        Ok(primary)
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "correla::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, CorrelaError>
    where
        Fut: core::future::Future<Output = Result<T, CorrelaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CorrelaError::provider_timeout(connector_name, capability)))
    }
}

/// Await `fut`, bounded by `deadline` when one is set.
///
/// On expiry returns `RequestTimeout` for `capability`.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<Duration>,
    capability: &'static str,
    fut: F,
) -> Result<T, CorrelaError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| CorrelaError::request_timeout(capability)),
        None => Ok(fut.await),
    }
}

/// Join a collection of tasks and apply an optional request-level deadline.
pub(crate) async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<Duration>,
    capability: &'static str,
) -> Result<Vec<T>, CorrelaError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    with_request_deadline(deadline, capability, futures::future::join_all(tasks)).await
}
