//! Re-export of foundational types from `paft` and `correla-types`.
// Consolidated re-exports so downstream crates can depend on `correla-core` only

pub use correla_types::labels;
pub use correla_types::{
    AcquisitionMode, BackoffConfig, CorrelaConfig, CorrelaError, RetryConfig, SecondaryConfig,
};

pub use paft::domain::{AssetKind, Instrument, Symbol};

pub use paft::money::{Currency, IsoCurrency, Money};

pub use rust_decimal::Decimal;

pub use paft::market::requests::history::{HistoryRequest, Interval, Range};
pub use paft::market::responses::history::{Candle, HistoryMeta, HistoryResponse};
