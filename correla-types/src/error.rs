use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every fallible operation in the correla workspace returns this error.
///
/// Acquisition code inspects [`CorrelaError::is_transient`] to decide whether a
/// failed provider call is worth repeating.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorrelaError {
    /// The source does not offer the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// What was asked for, e.g. `history`.
        capability: String,
    },

    /// Issues with the returned or expected data (mixed currencies, unrepresentable values).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument, including malformed primary series.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A price source failed in transport or upstream.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Name of the failing source.
        connector: String,
        /// Failure detail.
        msg: String,
    },

    /// The source has no data for the symbol or period.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "history for BTC-USD".
        what: String,
    },

    /// One provider call ran past `provider_timeout`.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Name of the slow source.
        connector: String,
        /// Call that was cut off.
        capability: String,
    },

    /// A per-date fan-out ran past `request_timeout`.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Call that was cut off.
        capability: String,
    },

    /// Too few usable observations for a statistical routine.
    #[error("insufficient data for {what}: need at least {required}, got {got}")]
    InsufficientData {
        /// Routine that rejected the input (e.g. "shapiro-wilk").
        what: String,
        /// Minimum number of observations required.
        required: usize,
        /// Number of usable observations supplied.
        got: usize,
    },

    /// A chart could not be rendered or written.
    #[error("render failed for {chart}: {msg}")]
    Render {
        /// Chart file name.
        chart: String,
        /// Why drawing or saving failed.
        msg: String,
    },

    /// Local I/O failure (report sink, output directory).
    #[error("io error: {0}")]
    Io(String),

    /// Anything not covered above.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CorrelaError {
    /// `Unsupported` for `cap`.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// `Connector` failure of source `connector`.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// `NotFound` describing what is missing.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// `ProviderTimeout` for `capability` on `connector`.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// `RequestTimeout` for `capability`.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// `InsufficientData` for routine `what`.
    pub fn insufficient(what: impl Into<String>, required: usize, got: usize) -> Self {
        Self::InsufficientData {
            what: what.into(),
            required,
            got,
        }
    }

    /// `Render` failure of `chart`.
    pub fn render(chart: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Render {
            chart: chart.into(),
            msg: msg.into(),
        }
    }

    /// Whether repeating the same provider call could succeed.
    ///
    /// `NotFound`, `Unsupported`, `InvalidArg` and statistical errors are final.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connector { .. }
                | Self::ProviderTimeout { .. }
                | Self::RequestTimeout { .. }
                | Self::Other(_)
        )
    }
}

impl From<std::io::Error> for CorrelaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<paft::Error> for CorrelaError {
    fn from(err: paft::Error) -> Self {
        use paft::Error as E;
        match err {
            E::Money(_) => Self::Data(err.to_string()),
            E::Core(_) | E::Domain(_) | E::Market(_) | E::MoneyParse(_) | E::Canonical(_) => {
                Self::InvalidArg(err.to_string())
            }
        }
    }
}

impl From<paft::market::MarketError> for CorrelaError {
    fn from(e: paft::market::MarketError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::domain::DomainError> for CorrelaError {
    fn from(e: paft::domain::DomainError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::core::PaftError> for CorrelaError {
    fn from(e: paft::core::PaftError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<paft::money::MoneyError> for CorrelaError {
    fn from(e: paft::money::MoneyError) -> Self {
        Self::Data(e.to_string())
    }
}
