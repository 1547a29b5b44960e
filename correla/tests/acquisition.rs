mod helpers;

use std::sync::Arc;
use std::time::Duration;

use chrono::Days;
use correla::{AcquisitionMode, Acquisition, labels};
use correla_core::{CorrelaError, PriceHistorySource, Symbol, parse_date};
use correla_mock::{MockBehavior, MockPriceSource, ScriptedController, ScriptedPriceSource};
use helpers::*;

fn values(acq: &Acquisition) -> Vec<Option<f64>> {
    let series = acq.series().expect("series present");
    [
        "2019-01-01",
        "2020-01-01",
        "2021-01-01",
        "2022-01-01",
        "2023-01-01",
    ]
    .iter()
    .map(|d| series.get(parse_date(d).unwrap()))
    .collect()
}

#[tokio::test]
async fn span_mode_fetches_every_primary_date() {
    let correla = mock_builder(BTC_USD).build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert!(prepared.acquisition.is_present());
    assert_eq!(
        values(&prepared.acquisition),
        BTC_CLOSES.iter().copied().map(Some).collect::<Vec<_>>()
    );
    assert_eq!(prepared.table.len(), 5);
    assert_eq!(prepared.table.secondary().label, labels::BTC_PRICE);
    assert_eq!(prepared.table.secondary().present(), 5);
}

#[tokio::test]
async fn span_mode_keeps_holes_missing() {
    let correla = mock_builder("BTC-SPARSE").build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    let col = &prepared.table.secondary().values;
    assert_eq!(col[3], None);
    assert_eq!(col[2], Some(BTC_CLOSES[2]));
    assert_eq!(col.iter().filter(|v| v.is_some()).count(), 4);
}

#[tokio::test]
async fn span_mode_requests_first_to_last_date_inclusive() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Return(mock_history(BTC_USD).await),
    )
    .await;
    let correla = builder_with(src, 1).build().unwrap();
    correla.prepare().await.unwrap();

    let calls = ctl.calls().await;
    assert_eq!(calls.len(), 1);
    let (start, end) = calls[0].period.unwrap();
    assert_eq!(start.date_naive(), parse_date("2019-01-01").unwrap());
    assert_eq!(end.date_naive(), parse_date("2023-01-02").unwrap());
}

#[tokio::test]
async fn per_date_mode_issues_one_single_day_request_per_date() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Return(mock_history(BTC_USD).await),
    )
    .await;
    let correla = builder_with(src, 1)
        .acquisition(AcquisitionMode::PerDate)
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert_eq!(
        values(&prepared.acquisition),
        BTC_CLOSES.iter().copied().map(Some).collect::<Vec<_>>()
    );

    let calls = ctl.calls().await;
    assert_eq!(calls.len(), 5);
    for call in calls {
        let (start, end) = call.period.unwrap();
        assert_eq!(
            start.date_naive().checked_add_days(Days::new(1)),
            Some(end.date_naive())
        );
    }
}

#[tokio::test]
async fn per_date_mode_leaves_dates_without_data_missing() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Return(mock_history("BTC-SPARSE").await),
    )
    .await;
    let correla = builder_with(src, 1)
        .acquisition(AcquisitionMode::PerDate)
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    let v = values(&prepared.acquisition);
    assert_eq!(v[3], None);
    assert_eq!(v.iter().flatten().count(), 4);
}

/// Scripted BTC source whose first call fails with a transient error.
async fn per_date_source_failing_once() -> (Arc<dyn PriceHistorySource>, ScriptedController) {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    let sym = Symbol::new(BTC_USD).unwrap();
    ctl.push_history_behavior(
        sym.clone(),
        MockBehavior::Fail(CorrelaError::connector("scripted", "flaky")),
    )
    .await;
    ctl.set_history_behavior(sym, MockBehavior::Return(mock_history(BTC_USD).await))
        .await;
    (src, ctl)
}

#[tokio::test(start_paused = true)]
async fn per_date_mode_hard_failure_on_one_date_is_absent() {
    let (src, ctl) = per_date_source_failing_once().await;
    let correla = builder_with(src, 1)
        .acquisition(AcquisitionMode::PerDate)
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    match &prepared.acquisition {
        Acquisition::Absent { reason } => assert!(reason.contains("flaky"), "{reason}"),
        other => panic!("expected absence, got {other:?}"),
    }
    assert_eq!(prepared.table.secondary().present(), 0);
    assert_eq!(ctl.call_count().await, 5);
}

#[tokio::test(start_paused = true)]
async fn per_date_mode_retries_the_failed_date() {
    let (src, ctl) = per_date_source_failing_once().await;
    let correla = builder_with(src, 2)
        .acquisition(AcquisitionMode::PerDate)
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert_eq!(
        values(&prepared.acquisition),
        BTC_CLOSES.iter().copied().map(Some).collect::<Vec<_>>()
    );
    assert_eq!(prepared.table.secondary().present(), 5);
    assert_eq!(ctl.call_count().await, 6);
}

#[tokio::test]
async fn per_date_mode_with_no_data_anywhere_is_absent() {
    let correla = mock_builder("NOPE")
        .acquisition(AcquisitionMode::PerDate)
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert!(!prepared.acquisition.is_present());
    assert_eq!(prepared.table.secondary().values, vec![None; 5]);
}

#[tokio::test]
async fn empty_span_history_is_absent() {
    let correla = mock_builder("EMPTY").build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    match &prepared.acquisition {
        Acquisition::Absent { reason } => assert!(reason.contains("not found"), "{reason}"),
        other => panic!("expected absence, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn transient_failure_is_retried_then_succeeds() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    let sym = Symbol::new(BTC_USD).unwrap();
    ctl.push_history_behavior(
        sym.clone(),
        MockBehavior::Fail(CorrelaError::connector("scripted", "flaky")),
    )
    .await;
    ctl.set_history_behavior(sym, MockBehavior::Return(mock_history(BTC_USD).await))
        .await;

    let correla = builder_with(src, 3).build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert!(prepared.acquisition.is_present());
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_degrade_to_absent() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Fail(CorrelaError::connector("scripted", "down")),
    )
    .await;

    let correla = builder_with(src, 3).build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert_eq!(ctl.call_count().await, 3);
    match &prepared.acquisition {
        Acquisition::Absent { reason } => assert!(reason.contains("down"), "{reason}"),
        other => panic!("expected absence, got {other:?}"),
    }
    assert_eq!(prepared.table.len(), 5);
    assert_eq!(prepared.table.secondary().present(), 0);
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(
        Symbol::new(BTC_USD).unwrap(),
        MockBehavior::Fail(CorrelaError::not_found("history for BTC-USD")),
    )
    .await;

    let correla = builder_with(src, 5).build().unwrap();
    let prepared = correla.prepare().await.unwrap();
    assert!(!prepared.acquisition.is_present());
    assert_eq!(ctl.call_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_and_degrades() {
    let correla = builder_with(Arc::new(MockPriceSource::new()), 1)
        .secondary("TIMEOUT", labels::BTC_PRICE)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    match &prepared.acquisition {
        Acquisition::Absent { reason } => {
            assert!(reason.contains("provider timed out"), "{reason}");
        }
        other => panic!("expected absence, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn request_deadline_bounds_per_date_fan_out() {
    let (src, ctl) = ScriptedPriceSource::new_with_controller("scripted");
    ctl.set_history_behavior(Symbol::new(BTC_USD).unwrap(), MockBehavior::Hang)
        .await;

    let correla = builder_with(src, 3)
        .acquisition(AcquisitionMode::PerDate)
        .provider_timeout(Duration::from_secs(10))
        .request_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let prepared = correla.prepare().await.unwrap();
    match &prepared.acquisition {
        Acquisition::Absent { reason } => {
            assert!(reason.contains("request timed out"), "{reason}");
        }
        other => panic!("expected absence, got {other:?}"),
    }
    assert_eq!(ctl.call_count().await, 5);
}
