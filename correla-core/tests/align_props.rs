use chrono::NaiveDate;
use correla_core::{PrimaryRecord, PrimarySeries, SecondarySeries, align};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // a few years of days so primary and secondary dates collide often
    (0u64..1500).prop_map(|d| {
        NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(d))
            .unwrap()
    })
}

fn arb_primary() -> impl Strategy<Value = PrimarySeries> {
    (
        proptest::collection::btree_set(arb_date(), 1..40),
        1usize..4,
        any::<bool>(),
    )
        .prop_flat_map(|(dates, width, reverse)| {
            let n = dates.len();
            (
                Just(dates),
                Just(reverse),
                proptest::collection::vec(
                    proptest::collection::vec(-1.0e6f64..1.0e6, width),
                    n,
                ),
            )
        })
        .prop_map(|(dates, reverse, rows): (BTreeSet<NaiveDate>, bool, Vec<Vec<f64>>)| {
            let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
            if reverse {
                dates.reverse();
            }
            let width = rows[0].len();
            let metrics = (0..width).map(|i| format!("m{i}")).collect();
            let records = dates
                .into_iter()
                .zip(rows)
                .map(|(d, v)| PrimaryRecord::new(d, v))
                .collect();
            PrimarySeries::new(metrics, records).unwrap()
        })
}

fn arb_secondary() -> impl Strategy<Value = SecondarySeries> {
    proptest::collection::btree_map(arb_date(), 0.0f64..100_000.0, 0..200)
        .prop_map(|m: BTreeMap<NaiveDate, f64>| SecondarySeries::new("BTC-USD", "S", m))
}

proptest! {
    #[test]
    fn absent_secondary_keeps_rows_and_is_all_missing(p in arb_primary()) {
        let t = align(&p, None, "S");
        prop_assert_eq!(t.len(), p.len());
        let dates: Vec<NaiveDate> = p.dates().collect();
        prop_assert_eq!(t.dates(), dates.as_slice());
        prop_assert!(t.secondary().values.iter().all(Option::is_none));
    }

    #[test]
    fn present_dates_surface_unchanged(p in arb_primary(), s in arb_secondary()) {
        let t = align(&p, Some(&s), "S");
        prop_assert_eq!(t.secondary().values.len(), p.len());
        for (d, cell) in t.dates().iter().zip(&t.secondary().values) {
            match s.get(*d) {
                Some(v) => prop_assert_eq!(*cell, Some(v)),
                None => prop_assert_eq!(*cell, None),
            }
        }
    }

    #[test]
    fn primary_columns_are_copied_verbatim(p in arb_primary(), s in arb_secondary()) {
        let t = align(&p, Some(&s), "S");
        for m in p.metrics() {
            let expected: Vec<Option<f64>> = p.column(m).unwrap().into_iter().map(Some).collect();
            prop_assert_eq!(&t.column(m).unwrap().values, &expected);
        }
        prop_assert_eq!(t.columns().len(), p.metrics().len() + 1);
    }

    #[test]
    fn align_is_idempotent(p in arb_primary(), s in arb_secondary()) {
        let a = align(&p, Some(&s), "S");
        let b = align(&p, Some(&s), "S");
        prop_assert_eq!(a, b);
    }
}
