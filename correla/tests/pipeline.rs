mod helpers;

use std::sync::Arc;

use correla::{
    ConsoleReporter, Correla, CorrelaConfig, CorrelaError, EthereumMetrics, NormalityOutcome,
    labels,
};
use correla_core::{HEATMAP_FILE, SCATTER_FILE, Symbol, TRENDS_FILE};
use correla_mock::{MockBehavior, ScriptedPriceSource};
use correla_render::PngRenderer;
use helpers::*;

fn text(reporter: ConsoleReporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[tokio::test]
async fn full_run_reports_and_writes_three_charts() {
    let dir = tempfile::tempdir().unwrap();
    let correla = mock_builder(BTC_USD)
        .with_renderer(Arc::new(PngRenderer::new()))
        .output_dir(dir.path())
        .build()
        .unwrap();

    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = correla.run(&mut reporter).await.unwrap();
    let out = text(reporter);

    assert!(summary.acquisition.is_present());
    assert!(summary.render_failures.is_empty());
    assert_eq!(summary.charts.len(), 3);
    for file in [SCATTER_FILE, HEATMAP_FILE, TRENDS_FILE] {
        assert!(dir.path().join(file).is_file(), "{file} missing");
    }

    assert!(out.starts_with("Loaded data (ethereum-metrics-2019-2023):"));
    assert!(out.contains("2019-01-01"));
    assert!(out.contains("3843.52"));
    assert!(out.contains("TVL (bn $): W = 0.957, p-value = 0.787 (normal: yes)"));
    assert!(out.contains("Stablecoins (bn $): W = 0.943, p-value = 0.687 (normal: yes)"));
    assert!(out.contains("Correlation between Stablecoins (bn $) and TVL (bn $): 0.998"));
    assert!(out.contains("Correlation matrix:"));
    assert!(out.contains("0.660"));
    assert!(!out.contains("Notice:"));
    assert!(out.contains(&format!("Chart saved as '{}'", dir.path().join(SCATTER_FILE).display())));
}

#[tokio::test]
async fn degraded_run_still_completes_with_missing_column() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Fail(CorrelaError::not_found("history for BTC-USD")),
    )
    .await;
    let correla = builder_with(src, 1).build().unwrap();

    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = correla.run(&mut reporter).await.unwrap();
    let out = text(reporter);

    assert_eq!(summary.table.len(), 5);
    assert_eq!(summary.table.secondary().values, vec![None; 5]);
    for other in summary.table.labels() {
        assert_eq!(summary.analysis.matrix.get(labels::BTC_PRICE, other), None);
    }
    assert!(out.contains("Notice: secondary series unavailable"));
    assert!(out.contains("n/a"));
    // every data row ends with the missing marker
    let data_rows: Vec<_> = out.lines().filter(|l| l.starts_with("20")).collect();
    assert_eq!(data_rows.len(), 5);
    assert!(data_rows.iter().all(|l| l.ends_with('-')));
    assert!(summary.charts.is_empty());
}

#[tokio::test]
async fn three_point_table_skips_nothing_and_correlates_perfectly() {
    let correla = mock_builder(BTC_USD)
        .with_primary(Arc::new(EthereumMetrics::three_point()))
        .build()
        .unwrap();
    let summary = correla.run(&mut ConsoleReporter::new(Vec::new())).await.unwrap();

    assert_eq!(summary.table.len(), 3);
    assert_eq!(summary.table.secondary().present(), 3);
    for outcome in &summary.analysis.normality {
        match outcome {
            NormalityOutcome::Tested { test, .. } => {
                assert_eq!(test.n, 3);
                assert!((test.p_value - 0.636_886_845).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    let tvl_btc = summary
        .analysis
        .matrix
        .get(labels::TVL, labels::BTC_PRICE)
        .unwrap();
    assert!((-1.0..=1.0).contains(&tvl_btc));
}

#[tokio::test]
async fn render_failures_are_listed_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let correla = mock_builder(BTC_USD)
        .with_renderer(Arc::new(PngRenderer::new()))
        .output_dir(&blocker)
        .build()
        .unwrap();

    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = correla.run(&mut reporter).await.unwrap();
    assert!(summary.charts.is_empty());
    assert_eq!(summary.render_failures.len(), 3);
    assert!(
        summary
            .render_failures
            .iter()
            .all(|e| matches!(e, CorrelaError::Render { .. }))
    );
    assert_eq!(text(reporter).matches("Chart not saved").count(), 3);
}

#[test]
fn build_requires_a_source_and_a_valid_config() {
    let err = Correla::builder().build().err().unwrap();
    assert!(matches!(err, CorrelaError::InvalidArg(_)));

    let err = mock_builder(BTC_USD).normality_alpha(1.5).build().err().unwrap();
    assert!(matches!(err, CorrelaError::InvalidArg(_)));

    let err = mock_builder(BTC_USD)
        .config(CorrelaConfig {
            retry: quick_retry(0),
            ..CorrelaConfig::default()
        })
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, CorrelaError::InvalidArg(_)));
}

#[tokio::test]
async fn secondary_label_must_not_shadow_a_primary_column() {
    let correla = mock_builder(BTC_USD)
        .secondary(BTC_USD, labels::TVL)
        .build()
        .unwrap();
    let err = correla.prepare().await.err().unwrap();
    assert!(matches!(err, CorrelaError::InvalidArg(ref m) if m.contains(labels::TVL)));
}

#[tokio::test]
async fn trend_chart_excludes_transactions_by_default() {
    let correla = mock_builder(BTC_USD).build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert_eq!(
        correla.trend_columns(&prepared.table),
        vec![
            labels::TVL,
            labels::STABLECOINS,
            labels::ETH_PRICE,
            labels::BTC_PRICE
        ]
    );
}
