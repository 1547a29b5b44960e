use std::path::PathBuf;
use std::sync::Arc;

use correla_core::PriceHistorySource;

/// Environment variable that switches the demos to the offline mock source.
pub const USE_MOCK_ENV: &str = "CORRELA_DEMOS_USE_MOCK";

/// True when the demos should stay offline.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok()
}

/// Return a price source for demos.
///
/// # Panics
/// Panics if the Yahoo Finance client cannot be constructed.
#[must_use]
pub fn get_source() -> Arc<dyn PriceHistorySource> {
    if use_mock() {
        println!("--- (Using Mock Source for CI) ---");
        Arc::new(correla_mock::MockPriceSource::new())
    } else {
        Arc::new(
            correla_yfinance::YfPriceSource::try_new_default()
                .expect("yfinance client construction failed"),
        )
    }
}

/// Where demos write their charts: the working directory, or a scratch
/// directory under the system temp dir when running offline.
#[must_use]
pub fn output_dir(demo: &str) -> PathBuf {
    if use_mock() {
        std::env::temp_dir().join("correla-demos").join(demo)
    } else {
        PathBuf::from(".")
    }
}
