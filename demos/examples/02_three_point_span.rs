use std::sync::Arc;

use correla::{AcquisitionMode, ConsoleReporter, Correla, EthereumMetrics};
use correla_demos::common::{get_source, output_dir};
use correla_render::PngRenderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One request spanning 2019-01-01..=2023-01-01; only exact dates are kept.
    let correla = Correla::builder()
        .with_primary(Arc::new(EthereumMetrics::three_point()))
        .with_source(get_source())
        .with_renderer(Arc::new(PngRenderer::new()))
        .acquisition(AcquisitionMode::Span)
        .output_dir(output_dir("02_three_point_span"))
        .build()?;

    let summary = correla.run(&mut ConsoleReporter::stdout()).await?;
    for (date, cells) in (0..summary.table.len()).filter_map(|i| summary.table.row(i)) {
        let btc = cells.last().copied().flatten();
        println!("{date}: BTC {}", btc.map_or_else(|| "missing".to_string(), |v| format!("{v:.2}")));
    }
    Ok(())
}
