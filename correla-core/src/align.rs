//! Exact-date alignment of a secondary series onto the primary table.

use crate::series::{AlignedTable, Column, PrimarySeries, SecondarySeries};

/// Extend `primary` with one column labelled `label` holding the secondary value
/// at each primary date.
///
/// Only exact calendar-date matches are used; a primary date the secondary
/// series does not carry gets `None`. When `secondary` is `None` the whole
/// column is `None`. Rows keep the primary order and count, and values are
/// copied unchanged.
///
/// `label` should differ from every primary metric. A colliding label is still
/// appended, and [`AlignedTable::column`] then resolves to the primary column;
/// [`AlignedTable::secondary`] always returns the appended one.
///
/// ```
/// use correla_core::{align, PrimarySeries, SecondarySeries, parse_date};
///
/// let p = PrimarySeries::from_columns(
///     &["2019-01-01", "2021-01-01"],
///     vec![("TVL", vec![40.0, 80.0])],
/// )
/// .unwrap();
/// let s = SecondarySeries::from_points(
///     "BTC-USD",
///     "BTC",
///     [(parse_date("2019-01-01").unwrap(), 3700.0)],
/// );
/// let t = align(&p, Some(&s), "BTC");
/// assert_eq!(t.secondary().values, vec![Some(3700.0), None]);
/// ```
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "correla::core::align",
        skip(primary, secondary),
        fields(rows = primary.len(), secondary_points = secondary.map_or(0, SecondarySeries::len)),
    )
)]
pub fn align(
    primary: &PrimarySeries,
    secondary: Option<&SecondarySeries>,
    label: &str,
) -> AlignedTable {
    let dates: Vec<_> = primary.dates().collect();

    let mut columns: Vec<Column> = primary
        .metrics()
        .iter()
        .enumerate()
        .map(|(idx, m)| Column {
            label: m.clone(),
            values: primary.records().iter().map(|r| Some(r.values[idx])).collect(),
        })
        .collect();

    let appended = match secondary {
        Some(s) => dates.iter().map(|d| s.get(*d)).collect(),
        None => vec![None; dates.len()],
    };
    columns.push(Column {
        label: label.to_string(),
        values: appended,
    });

    AlignedTable::from_parts(dates, columns)
}
