//! Month guide dates for date axes.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Day of the month used for the monthly guides; every month has one.
pub const MONTH_TICK_DAY: u32 = 28;

/// The 28th of every (year, month) present in `dates`, sorted and distinct.
pub fn month_end_ticks(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    dates
        .iter()
        .map(|date| (date.year(), date.month()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|(year, month)| NaiveDate::from_ymd_opt(year, month, MONTH_TICK_DAY))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_tick_per_month() {
        let dates = vec![date(2020, 1, 29), date(2020, 1, 30), date(2020, 2, 1), date(2020, 2, 3)];
        assert_eq!(
            month_end_ticks(&dates),
            vec![date(2020, 1, 28), date(2020, 2, 28)]
        );
    }

    #[test]
    fn test_year_comes_from_data() {
        let dates = vec![date(2020, 12, 30), date(2021, 1, 2), date(2021, 2, 1)];
        assert_eq!(
            month_end_ticks(&dates),
            vec![date(2020, 12, 28), date(2021, 1, 28), date(2021, 2, 28)]
        );
    }

    #[test]
    fn test_unsorted_input_and_empty() {
        let dates = vec![date(2021, 3, 1), date(2020, 3, 5)];
        assert_eq!(
            month_end_ticks(&dates),
            vec![date(2020, 3, 28), date(2021, 3, 28)]
        );
        assert!(month_end_ticks(&[]).is_empty());
    }
}
