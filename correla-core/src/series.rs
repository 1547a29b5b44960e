use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CorrelaError;

/// Date format accepted by the string-based constructors.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
/// Returns `InvalidArg` if `s` is not a valid calendar date in that format.
pub fn parse_date(s: &str) -> Result<NaiveDate, CorrelaError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| CorrelaError::InvalidArg(format!("unparseable date '{s}': {e}")))
}

/// One row of the primary table: a date plus one value per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRecord {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Values in the same order as [`PrimarySeries::metrics`].
    pub values: Vec<f64>,
}

impl PrimaryRecord {
    /// Build a record from a date and its metric values.
    #[must_use]
    pub const fn new(date: NaiveDate, values: Vec<f64>) -> Self {
        Self { date, values }
    }
}

/// The authoritative metric table that drives the row dates.
///
/// Construction validates the shape, so a `PrimarySeries` value is always
/// non-empty, rectangular, finite, and free of duplicate dates. Record order is
/// preserved as given. Deserialization goes through [`PrimarySeries::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPrimarySeries")]
pub struct PrimarySeries {
    metrics: Vec<String>,
    records: Vec<PrimaryRecord>,
}

/// Unchecked wire shape of [`PrimarySeries`].
#[derive(Deserialize)]
struct RawPrimarySeries {
    metrics: Vec<String>,
    records: Vec<PrimaryRecord>,
}

impl TryFrom<RawPrimarySeries> for PrimarySeries {
    type Error = CorrelaError;

    fn try_from(raw: RawPrimarySeries) -> Result<Self, Self::Error> {
        Self::new(raw.metrics, raw.records)
    }
}

impl PrimarySeries {
    /// Build a primary series from metric labels and records.
    ///
    /// # Errors
    /// Returns `InvalidArg` if there are no metrics or no records, if a metric
    /// label is blank or repeated, if a record's width differs from the metric
    /// count, if a value is not finite, or if two records share a date.
    pub fn new(metrics: Vec<String>, records: Vec<PrimaryRecord>) -> Result<Self, CorrelaError> {
        if metrics.is_empty() {
            return Err(CorrelaError::InvalidArg(
                "primary series needs at least one metric".into(),
            ));
        }
        if records.is_empty() {
            return Err(CorrelaError::InvalidArg(
                "primary series needs at least one record".into(),
            ));
        }

        let mut seen_labels = HashSet::new();
        for m in &metrics {
            if m.trim().is_empty() {
                return Err(CorrelaError::InvalidArg("blank metric label".into()));
            }
            if !seen_labels.insert(m.as_str()) {
                return Err(CorrelaError::InvalidArg(format!(
                    "duplicate metric label '{m}'"
                )));
            }
        }

        let mut seen_dates = HashSet::new();
        for r in &records {
            if r.values.len() != metrics.len() {
                return Err(CorrelaError::InvalidArg(format!(
                    "record {} has {} values, expected {}",
                    r.date,
                    r.values.len(),
                    metrics.len()
                )));
            }
            if let Some(bad) = r.values.iter().position(|v| !v.is_finite()) {
                return Err(CorrelaError::InvalidArg(format!(
                    "record {} has a non-finite value for '{}'",
                    r.date, metrics[bad]
                )));
            }
            if !seen_dates.insert(r.date) {
                return Err(CorrelaError::InvalidArg(format!(
                    "duplicate primary date {}",
                    r.date
                )));
            }
        }

        Ok(Self { metrics, records })
    }

    /// Build a primary series from ISO date strings and labelled columns.
    ///
    /// ```
    /// use correla_core::PrimarySeries;
    ///
    /// let p = PrimarySeries::from_columns(
    ///     &["2019-01-01", "2021-01-01"],
    ///     vec![("TVL", vec![40.0, 80.0])],
    /// )
    /// .unwrap();
    /// assert_eq!(p.len(), 2);
    /// ```
    ///
    /// # Errors
    /// Returns `InvalidArg` if a date does not parse, a column length differs
    /// from the number of dates, or any check of [`PrimarySeries::new`] fails.
    pub fn from_columns(
        dates: &[&str],
        columns: Vec<(&str, Vec<f64>)>,
    ) -> Result<Self, CorrelaError> {
        let parsed = dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<Vec<_>, _>>()?;

        for (label, col) in &columns {
            if col.len() != parsed.len() {
                return Err(CorrelaError::InvalidArg(format!(
                    "column '{label}' has {} values for {} dates",
                    col.len(),
                    parsed.len()
                )));
            }
        }

        let metrics = columns.iter().map(|(l, _)| (*l).to_string()).collect();
        let records = parsed
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                PrimaryRecord::new(date, columns.iter().map(|(_, col)| col[i]).collect())
            })
            .collect();
        Self::new(metrics, records)
    }

    /// Metric labels, in column order.
    #[must_use]
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Records, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[PrimaryRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: construction rejects empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dates in record order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().map(|r| r.date)
    }

    /// Earliest date in the series.
    #[must_use]
    pub fn first_date(&self) -> NaiveDate {
        self.dates().min().unwrap_or_default()
    }

    /// Latest date in the series.
    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        self.dates().max().unwrap_or_default()
    }

    /// Values of one metric in record order, if the label exists.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        let idx = self.metrics.iter().position(|m| m == label)?;
        Some(self.records.iter().map(|r| r.values[idx]).collect())
    }
}

/// A single externally sourced value per calendar date (e.g. a daily close).
///
/// Dates are unique; on construction from points the first value seen for a
/// date wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondarySeries {
    symbol: String,
    label: String,
    values: BTreeMap<NaiveDate, f64>,
}

impl SecondarySeries {
    /// Build from an existing date→value map.
    pub fn new(
        symbol: impl Into<String>,
        label: impl Into<String>,
        values: BTreeMap<NaiveDate, f64>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
            values,
        }
    }

    /// Build from `(date, value)` points; the first value for a date wins.
    pub fn from_points<I>(symbol: impl Into<String>, label: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut values = BTreeMap::new();
        for (d, v) in points {
            values.entry(d).or_insert(v);
        }
        Self::new(symbol, label, values)
    }

    /// Provider symbol the series was fetched for.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Column label used when the series is aligned.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value at exactly `date`, if present.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// Number of dated values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no dated values are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(date, value)` in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    /// Absorb another series' points; dates already present keep their value.
    pub fn merge_from(&mut self, other: Self) {
        for (d, v) in other.values {
            self.values.entry(d).or_insert(v);
        }
    }
}

/// A named column of optional values. `None` is the missing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column label.
    pub label: String,
    /// One cell per table row.
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Number of present (non-missing) cells.
    #[must_use]
    pub fn present(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Present values only, in row order.
    #[must_use]
    pub fn present_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }
}

/// Primary table extended with one aligned secondary column.
///
/// Row count and order always match the primary series the table was built
/// from. Primary columns are fully populated; the secondary column (always
/// last) may hold missing cells. Built only by `align`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl AlignedTable {
    pub(crate) const fn from_parts(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        Self { dates, columns }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row dates, in primary order.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// All columns: primary metrics first, the aligned secondary column last.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column labels in table order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Look up a column by label.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// The aligned secondary column.
    #[must_use]
    pub fn secondary(&self) -> &Column {
        // `from_parts` callers always append the secondary column last.
        &self.columns[self.columns.len() - 1]
    }

    /// Cells of row `i` in column order.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<(NaiveDate, Vec<Option<f64>>)> {
        let date = *self.dates.get(i)?;
        Some((date, self.columns.iter().map(|c| c.values[i]).collect()))
    }
}
