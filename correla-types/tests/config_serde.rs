use std::time::Duration;

use correla_types::{AcquisitionMode, BackoffConfig, CorrelaConfig, CorrelaError, labels};

#[test]
fn empty_document_yields_defaults() {
    let cfg = CorrelaConfig::from_json_str("{}").expect("defaults parse");
    assert_eq!(cfg, CorrelaConfig::default());
    assert_eq!(cfg.secondary.symbol, "BTC-USD");
    assert_eq!(cfg.secondary.label, labels::BTC_PRICE);
    assert_eq!(cfg.acquisition, AcquisitionMode::Span);
}

#[test]
fn partial_document_overrides_selected_fields() {
    let json = r#"{
        "acquisition": "PerDate",
        "provider_timeout": { "secs": 2, "nanos": 0 },
        "normality_alpha": 0.01,
        "secondary": { "symbol": "ETH-USD", "label": "ETH close" }
    }"#;
    let cfg = CorrelaConfig::from_json_str(json).expect("parse");
    assert_eq!(cfg.acquisition, AcquisitionMode::PerDate);
    assert_eq!(cfg.provider_timeout, Duration::from_secs(2));
    assert!((cfg.normality_alpha - 0.01).abs() < f64::EPSILON);
    assert_eq!(cfg.secondary.symbol, "ETH-USD");
    assert_eq!(cfg.retry, CorrelaConfig::default().retry);
}

#[test]
fn serialized_config_parses_back() {
    let mut cfg = CorrelaConfig::default();
    cfg.request_timeout = Some(Duration::from_millis(1500));
    cfg.focus_pair = None;
    let json = serde_json::to_string(&cfg).unwrap();
    let back = CorrelaConfig::from_json_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn zero_attempts_rejected() {
    let err = CorrelaConfig::from_json_str(r#"{ "retry": { "attempts": 0, "backoff": {
        "min_backoff_ms": 1, "max_backoff_ms": 2, "factor": 2, "jitter_percent": 0 } } }"#)
        .unwrap_err();
    assert!(matches!(err, CorrelaError::InvalidArg(_)));
}

#[test]
fn alpha_out_of_range_rejected() {
    let err = CorrelaConfig::from_json_str(r#"{ "normality_alpha": 1.5 }"#).unwrap_err();
    assert!(matches!(err, CorrelaError::InvalidArg(msg) if msg.contains("normality_alpha")));
}

#[test]
fn malformed_json_is_invalid_arg() {
    let err = CorrelaConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, CorrelaError::InvalidArg(_)));
}

#[test]
fn backoff_delays_grow_and_cap() {
    let b = BackoffConfig {
        min_backoff_ms: 100,
        max_backoff_ms: 1_000,
        factor: 3,
        jitter_percent: 0,
    };
    assert_eq!(b.delay_ms(0), 100);
    assert_eq!(b.delay_ms(1), 300);
    assert_eq!(b.delay_ms(2), 900);
    assert_eq!(b.delay_ms(3), 1_000);
    assert_eq!(b.delay_ms(40), 1_000);
}
