// Shared fixtures so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use correla::{BackoffConfig, Correla, CorrelaBuilder, RetryConfig, labels};
use correla_core::{
    AssetKind, HistoryResponse, Instrument, PriceHistorySource, daily_request, parse_date,
};
use correla_mock::MockPriceSource;

pub const BTC_USD: &str = "BTC-USD";

/// New Year BTC closes served by the mock, in date order.
pub const BTC_CLOSES: [f64; 5] = [3843.52, 7200.17, 29374.15, 47686.81, 16625.08];

pub fn btc() -> Instrument {
    Instrument::from_symbol(BTC_USD, AssetKind::Crypto).expect("valid symbol")
}

/// Full 2019-2023 history for `symbol` from the static mock.
pub async fn mock_history(symbol: &str) -> HistoryResponse {
    let inst = Instrument::from_symbol(symbol, AssetKind::Crypto).expect("valid symbol");
    let req = daily_request(
        parse_date("2019-01-01").unwrap(),
        parse_date("2023-01-01").unwrap(),
    )
    .unwrap();
    MockPriceSource::new().history(&inst, req).await.unwrap()
}

/// Fast, deterministic retry policy: `attempts` tries, 100ms apart, no jitter.
pub const fn quick_retry(attempts: u32) -> RetryConfig {
    RetryConfig {
        attempts,
        backoff: BackoffConfig {
            min_backoff_ms: 100,
            max_backoff_ms: 1_000,
            factor: 2,
            jitter_percent: 0,
        },
    }
}

/// Builder wired to `source` with the default BTC label and a quick retry policy.
pub fn builder_with(source: Arc<dyn PriceHistorySource>, attempts: u32) -> CorrelaBuilder {
    Correla::builder()
        .with_source(source)
        .retry(quick_retry(attempts))
        .provider_timeout(Duration::from_secs(1))
}

/// Builder over the static mock for `symbol`.
pub fn mock_builder(symbol: &str) -> CorrelaBuilder {
    builder_with(Arc::new(MockPriceSource::new()), 3).secondary(symbol, labels::BTC_PRICE)
}
