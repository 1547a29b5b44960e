//! Daily close extraction from provider history.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use paft::market::requests::history::{HistoryRequest, Interval};
use paft::market::responses::history::{Candle, HistoryMeta, HistoryResponse};
use paft::money::Currency;
use rust_decimal::prelude::ToPrimitive;

use crate::CorrelaError;
use crate::series::SecondarySeries;

/// Calendar date of `ts` in the exchange's local time.
///
/// Uses the IANA time zone when present, else the fixed UTC offset, else UTC.
#[must_use]
pub fn calendar_date(ts: DateTime<Utc>, meta: Option<&HistoryMeta>) -> NaiveDate {
    if let Some(tz) = meta.and_then(|m| m.timezone) {
        return ts.with_timezone(&tz).date_naive();
    }
    let offset = meta
        .and_then(|m| m.utc_offset_seconds)
        .and_then(|s| i32::try_from(s).ok())
        .and_then(FixedOffset::east_opt);
    match offset {
        Some(off) => ts.with_timezone(&off).date_naive(),
        None => ts.date_naive(),
    }
}

fn close_as_f64(c: &Candle) -> Result<f64, CorrelaError> {
    c.close
        .amount()
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            CorrelaError::Data(format!("close at {} is not representable as f64", c.ts))
        })
}

/// Daily `(date, close)` points from a history response, in candle order.
///
/// Candles whose timestamps fall on the same local date all produce a point;
/// deduplication happens when the points are collected into a series.
///
/// # Errors
/// Returns `Data` if candles mix currencies or a close is not representable.
pub fn daily_closes(resp: &HistoryResponse) -> Result<Vec<(NaiveDate, f64)>, CorrelaError> {
    let mut currency: Option<&Currency> = None;
    let mut out = Vec::with_capacity(resp.candles.len());
    for c in &resp.candles {
        let cur = c.close.currency();
        match currency {
            Some(expected) if expected != cur => {
                return Err(CorrelaError::Data(format!(
                    "currency mismatch across series: expected {expected:?}, got {cur:?}"
                )));
            }
            Some(_) => {}
            None => currency = Some(cur),
        }
        out.push((calendar_date(c.ts, resp.meta.as_ref()), close_as_f64(c)?));
    }
    Ok(out)
}

impl SecondarySeries {
    /// Build a secondary series from a provider history response.
    ///
    /// Candles are visited in timestamp order and the earliest candle of each
    /// local date wins.
    ///
    /// # Errors
    /// Returns `Data` if candles mix currencies or a close is not representable.
    pub fn from_history(
        symbol: impl Into<String>,
        label: impl Into<String>,
        resp: &HistoryResponse,
    ) -> Result<Self, CorrelaError> {
        let points = daily_closes(resp)?;
        let mut timed: Vec<(DateTime<Utc>, (NaiveDate, f64))> = resp
            .candles
            .iter()
            .map(|c| c.ts)
            .zip(points)
            .collect();
        timed.sort_by_key(|(ts, _)| *ts);
        Ok(Self::from_points(
            symbol,
            label,
            timed.into_iter().map(|(_, p)| p),
        ))
    }
}

/// Daily-interval request covering `start..=end_inclusive`.
///
/// The period is half-open on the wire, so the end is pushed one day past
/// `end_inclusive` (both at UTC midnight).
///
/// # Errors
/// Returns `InvalidArg` if `end_inclusive` precedes `start` or the dates overflow.
pub fn daily_request(
    start: NaiveDate,
    end_inclusive: NaiveDate,
) -> Result<HistoryRequest, CorrelaError> {
    if end_inclusive < start {
        return Err(CorrelaError::InvalidArg(format!(
            "request end {end_inclusive} precedes start {start}"
        )));
    }
    let end = end_inclusive
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CorrelaError::InvalidArg(format!("date overflow after {end_inclusive}")))?;
    let start_dt = start
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CorrelaError::InvalidArg(format!("invalid start {start}")))?
        .and_utc();
    let end_dt = end
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CorrelaError::InvalidArg(format!("invalid end {end}")))?
        .and_utc();
    Ok(HistoryRequest::try_from_period(start_dt, end_dt, Interval::D1)?)
}
