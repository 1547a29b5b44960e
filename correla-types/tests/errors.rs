use correla_types::CorrelaError;

#[test]
fn transient_classification() {
    assert!(CorrelaError::connector("yf", "502").is_transient());
    assert!(CorrelaError::provider_timeout("yf", "history").is_transient());
    assert!(CorrelaError::request_timeout("history").is_transient());
    assert!(!CorrelaError::not_found("history for BTC-USD").is_transient());
    assert!(!CorrelaError::unsupported("history").is_transient());
    assert!(!CorrelaError::InvalidArg("bad".into()).is_transient());
    assert!(!CorrelaError::insufficient("shapiro-wilk", 3, 2).is_transient());
}

#[test]
fn display_messages_are_descriptive() {
    let e = CorrelaError::insufficient("shapiro-wilk", 3, 2);
    assert_eq!(
        e.to_string(),
        "insufficient data for shapiro-wilk: need at least 3, got 2"
    );
    let e = CorrelaError::render("metrics_trends.png", "disk full");
    assert_eq!(e.to_string(), "render failed for metrics_trends.png: disk full");
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let e: CorrelaError = io.into();
    assert!(matches!(e, CorrelaError::Io(msg) if msg.contains("denied")));
}

#[test]
fn errors_roundtrip_through_json() {
    let e = CorrelaError::connector("correla-yfinance", "status 500: history for BTC-USD");
    let json = serde_json::to_string(&e).unwrap();
    let back: CorrelaError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, e);
}
