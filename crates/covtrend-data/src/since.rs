//! Re-indexing a series to "days since the nth case".

use crate::table::TimeSeriesTable;
use chrono::NaiveDate;
use covtrend_common::{Geography, Result};
use serde::{Deserialize, Serialize};

/// One point of an aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SincePoint {
    /// Days since the threshold was first reached.
    pub day: u32,
    pub date: NaiveDate,
    pub value: i64,
}

/// A series starting at the first date its value reached `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinceSeries {
    pub geography: Geography,
    pub threshold: i64,
    pub points: Vec<SincePoint>,
}

impl SinceSeries {
    /// Date of day zero.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// The most recent point.
    pub fn last(&self) -> Option<&SincePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Align `geography`'s series so day zero is the first value `>= threshold`.
///
/// Returns `Ok(None)` when the threshold is never reached and an error when
/// the geography is not in the table.
pub fn since_threshold(
    table: &TimeSeriesTable,
    threshold: i64,
    geography: &Geography,
) -> Result<Option<SinceSeries>> {
    let series = table.series(geography)?;

    let points: Vec<SincePoint> = series
        .points()
        .filter(|&(_, value)| value >= threshold)
        .zip(0u32..)
        .map(|((date, value), day)| SincePoint { day, date, value })
        .collect();

    if points.is_empty() {
        return Ok(None);
    }

    Ok(Some(SinceSeries {
        geography: geography.clone(),
        threshold,
        points,
    }))
}
