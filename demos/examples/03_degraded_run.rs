use correla::{BackoffConfig, ConsoleReporter, Correla, RetryConfig, labels};
use correla_demos::common::{get_source, use_mock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A symbol the source cannot serve: the mock fails on "FAIL", Yahoo has no such ticker.
    let symbol = if use_mock() { "FAIL" } else { "NO-SUCH-COIN-USD" };

    let correla = Correla::builder()
        .with_source(get_source())
        .secondary(symbol, labels::BTC_PRICE)
        .retry(RetryConfig {
            attempts: 2,
            backoff: BackoffConfig {
                min_backoff_ms: 50,
                max_backoff_ms: 200,
                factor: 2,
                jitter_percent: 10,
            },
        })
        .build()?;

    // The run finishes; the secondary column is entirely missing and a notice is printed.
    let summary = correla.run(&mut ConsoleReporter::stdout()).await?;
    assert!(!summary.acquisition.is_present());
    Ok(())
}
