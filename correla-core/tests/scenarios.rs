use correla_core::{
    CorrelaError, PrimarySeries, SecondarySeries, align, correlation_matrix, parse_date, pearson,
};

fn d(s: &str) -> chrono::NaiveDate {
    parse_date(s).unwrap()
}

#[test]
fn sparse_secondary_matches_exact_dates_only() {
    let p = PrimarySeries::from_columns(
        &["2019-01-01", "2021-01-01"],
        vec![("TVL", vec![40.0, 80.0])],
    )
    .unwrap();
    let s = SecondarySeries::from_points(
        "BTC-USD",
        "BTC",
        [(d("2019-01-01"), 3700.0), (d("2020-06-01"), 9000.0)],
    );
    let t = align(&p, Some(&s), "BTC");
    assert_eq!(t.secondary().values, vec![Some(3700.0), None]);
}

#[test]
fn absent_secondary_correlates_as_undefined() {
    let p = PrimarySeries::from_columns(
        &[
            "2019-01-01",
            "2020-01-01",
            "2021-01-01",
            "2022-01-01",
            "2023-01-01",
        ],
        vec![
            ("TVL", vec![40.0, 60.0, 80.0, 90.0, 100.0]),
            ("Stablecoins", vec![30.0, 60.0, 90.0, 110.0, 120.0]),
        ],
    )
    .unwrap();
    let t = align(&p, None, "BTC");
    assert_eq!(t.secondary().values, vec![None; 5]);

    let m = correlation_matrix(&t);
    assert_eq!(m.len(), 3);
    for other in ["TVL", "Stablecoins", "BTC"] {
        assert_eq!(m.get("BTC", other), None, "BTC vs {other} must be undefined");
    }
    assert_eq!(m.get("TVL", "TVL"), Some(1.0));
    assert!(m.get("TVL", "Stablecoins").unwrap() > 0.9);
}

#[test]
fn identical_columns_correlate_to_one() {
    let x = vec![Some(1.5), Some(2.0), Some(7.25), Some(3.0)];
    let r = pearson(&x, &x).unwrap();
    assert!((r - 1.0).abs() < 1e-12);
}

#[test]
fn matrix_is_symmetric() {
    let p = PrimarySeries::from_columns(
        &["2019-01-01", "2020-01-01", "2021-01-01"],
        vec![("a", vec![1.0, 4.0, 2.0]), ("b", vec![3.0, 1.0, 5.0])],
    )
    .unwrap();
    let s = SecondarySeries::from_points(
        "X",
        "s",
        [(d("2019-01-01"), 10.0), (d("2020-01-01"), 30.0), (d("2021-01-01"), 20.0)],
    );
    let m = correlation_matrix(&align(&p, Some(&s), "s"));
    for i in 0..m.len() {
        for j in 0..m.len() {
            assert_eq!(m.at(i, j), m.at(j, i));
        }
    }
}

#[test]
fn malformed_primary_is_rejected() {
    let dup = PrimarySeries::from_columns(&["2019-01-01", "2019-01-01"], vec![("a", vec![1.0, 2.0])]);
    assert!(matches!(dup, Err(CorrelaError::InvalidArg(_))));

    let ragged = PrimarySeries::from_columns(&["2019-01-01", "2020-01-01"], vec![("a", vec![1.0])]);
    assert!(matches!(ragged, Err(CorrelaError::InvalidArg(_))));

    let bad_date = PrimarySeries::from_columns(&["2019-13-01"], vec![("a", vec![1.0])]);
    assert!(matches!(bad_date, Err(CorrelaError::InvalidArg(_))));

    let empty = PrimarySeries::from_columns(&[], vec![("a", vec![])]);
    assert!(matches!(empty, Err(CorrelaError::InvalidArg(_))));

    let nan = PrimarySeries::from_columns(&["2019-01-01"], vec![("a", vec![f64::NAN])]);
    assert!(matches!(nan, Err(CorrelaError::InvalidArg(_))));
}

#[test]
fn primary_json_goes_through_validation() {
    let ragged = r#"{"metrics":["a","b"],"records":[{"date":"2019-01-01","values":[1.0]}]}"#;
    let err = serde_json::from_str::<PrimarySeries>(ragged).unwrap_err();
    assert!(err.to_string().contains("expected 2"), "{err}");

    let dup = r#"{"metrics":["a"],"records":[
        {"date":"2019-01-01","values":[1.0]},
        {"date":"2019-01-01","values":[2.0]}]}"#;
    assert!(serde_json::from_str::<PrimarySeries>(dup).is_err());

    assert!(serde_json::from_str::<PrimarySeries>(r#"{"metrics":["a"],"records":[]}"#).is_err());

    let p = PrimarySeries::from_columns(&["2019-01-01", "2020-01-01"], vec![("a", vec![1.0, 2.0])])
        .unwrap();
    let back: PrimarySeries = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
    assert_eq!(back, p);
    assert_eq!(align(&back, None, "s").len(), 2);
}

#[test]
fn secondary_first_value_wins_on_duplicate_dates() {
    let s = SecondarySeries::from_points("X", "s", [(d("2020-01-01"), 1.0), (d("2020-01-01"), 2.0)]);
    assert_eq!(s.len(), 1);
    assert_eq!(s.get(d("2020-01-01")), Some(1.0));
}
