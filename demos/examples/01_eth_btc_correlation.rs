use std::sync::Arc;

use correla::{AcquisitionMode, ConsoleReporter, Correla, EthereumMetrics};
use correla_demos::common::{get_source, output_dir};
use correla_render::PngRenderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Pick the price source (mock in CI when CORRELA_DEMOS_USE_MOCK is set).
    let source = get_source();

    // 2. Five yearly Ethereum observations, BTC fetched one day at a time.
    let correla = Correla::builder()
        .with_primary(Arc::new(EthereumMetrics::five_year()))
        .with_source(source)
        .with_renderer(Arc::new(PngRenderer::new()))
        .acquisition(AcquisitionMode::PerDate)
        .output_dir(output_dir("01_eth_btc_correlation"))
        .build()?;

    // 3. Align, analyse, draw and print.
    let summary = correla.run(&mut ConsoleReporter::stdout()).await?;

    println!(
        "\n{} of {} dates have a BTC close",
        summary.table.secondary().present(),
        summary.table.len()
    );
    Ok(())
}
