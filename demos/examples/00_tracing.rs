use std::sync::Arc;

use correla::{AcquisitionMode, ConsoleReporter, Correla};
use correla_demos::common::{get_source, output_dir};
use correla_render::PngRenderer;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,correla=trace,correla_yfinance=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Per-date acquisition makes one traced provider call per primary date.
    let correla = Correla::builder()
        .with_source(get_source())
        .with_renderer(Arc::new(PngRenderer::new()))
        .acquisition(AcquisitionMode::PerDate)
        .output_dir(output_dir("00_tracing"))
        .build()?;

    let summary = correla.run(&mut ConsoleReporter::stdout()).await?;
    tracing::info!(
        charts = summary.charts.len(),
        btc_points = summary.table.secondary().present(),
        "demo finished"
    );
    Ok(())
}
