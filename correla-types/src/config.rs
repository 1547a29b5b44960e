//! Configuration types shared across the orchestrator and sources.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CorrelaError;
use crate::labels;

/// How the secondary price series is requested from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AcquisitionMode {
    /// One request spanning the first to the last primary date (inclusive).
    #[default]
    Span,
    /// One single-day request per primary date. Dates without data stay missing.
    PerDate,
}

/// Exponential backoff configuration for retrying secondary acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Minimum backoff delay in milliseconds.
    pub min_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor to increase delay after each failure (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_backoff_ms: 500,
            max_backoff_ms: 30_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl BackoffConfig {
    /// Base delay before retry number `retry` (0-based), without jitter.
    #[must_use]
    pub fn delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                return self.max_backoff_ms;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Retry policy for transient acquisition failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one. `1` disables retries.
    pub attempts: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffConfig,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: BackoffConfig::default(),
        }
    }
}

/// Identity of the secondary series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryConfig {
    /// Provider symbol, e.g. `BTC-USD`.
    pub symbol: String,
    /// Column label used in the aligned table.
    pub label: String,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-USD".to_string(),
            label: labels::BTC_PRICE.to_string(),
        }
    }
}

/// Global configuration for the `Correla` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelaConfig {
    /// Secondary series identity.
    pub secondary: SecondaryConfig,
    /// Request shape used against the price source.
    pub acquisition: AcquisitionMode,
    /// Timeout for each individual provider call.
    pub provider_timeout: Duration,
    /// Optional deadline bounding a whole per-date fan-out.
    pub request_timeout: Option<Duration>,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
    /// Significance level for the normality verdict.
    pub normality_alpha: f64,
    /// Columns that get a Shapiro-Wilk check.
    pub normality_columns: Vec<String>,
    /// Pair whose correlation is reported on its own line (also the scatter axes, x then y).
    pub focus_pair: Option<(String, String)>,
    /// Columns left out of the trend chart.
    pub trend_exclude: Vec<String>,
    /// Directory receiving rendered charts.
    pub output_dir: PathBuf,
}

impl Default for CorrelaConfig {
    fn default() -> Self {
        Self {
            secondary: SecondaryConfig::default(),
            acquisition: AcquisitionMode::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            retry: RetryConfig::default(),
            normality_alpha: 0.05,
            normality_columns: vec![labels::TVL.to_string(), labels::STABLECOINS.to_string()],
            focus_pair: Some((labels::STABLECOINS.to_string(), labels::TVL.to_string())),
            trend_exclude: vec![labels::TRANSACTIONS.to_string()],
            output_dir: PathBuf::from("."),
        }
    }
}

impl CorrelaConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the document is not valid JSON for this schema or
    /// if [`CorrelaConfig::validate`] rejects it.
    pub fn from_json_str(s: &str) -> Result<Self, CorrelaError> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CorrelaError::InvalidArg(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the retry policy has zero attempts, the alpha is
    /// outside `(0, 1)`, or the secondary symbol/label is blank.
    pub fn validate(&self) -> Result<(), CorrelaError> {
        if self.retry.attempts == 0 {
            return Err(CorrelaError::InvalidArg(
                "retry.attempts must be at least 1".into(),
            ));
        }
        if !(self.normality_alpha > 0.0 && self.normality_alpha < 1.0) {
            return Err(CorrelaError::InvalidArg(format!(
                "normality_alpha must be in (0, 1), got {}",
                self.normality_alpha
            )));
        }
        if self.secondary.symbol.trim().is_empty() || self.secondary.label.trim().is_empty() {
            return Err(CorrelaError::InvalidArg(
                "secondary symbol and label must be non-empty".into(),
            ));
        }
        Ok(())
    }
}
