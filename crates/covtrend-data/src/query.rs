//! Per-geography lookups on a [`TimeSeriesTable`].

use crate::table::TimeSeriesTable;
use chrono::NaiveDate;
use covtrend_common::{CovError, Geography, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A dated series of counts for one geography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<i64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent date and value.
    pub fn last(&self) -> Option<(NaiveDate, i64)> {
        self.dates.last().copied().zip(self.values.last().copied())
    }

    /// `(date, value)` pairs in date order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

impl TimeSeriesTable {
    /// Counts for `geography`, one per date.
    ///
    /// A country sums every matching row. A province takes the first row
    /// matching both names.
    pub fn num_cases(&self, geography: &Geography) -> Result<Vec<i64>> {
        match &geography.province {
            Some(_) => self
                .regions()
                .iter()
                .find(|region| region.matches(geography))
                .map(|region| region.counts.clone())
                .ok_or_else(|| not_found(self, geography)),
            None => {
                let mut totals = vec![0i64; self.dates().len()];
                let mut matched = false;

                for region in self.regions().iter().filter(|r| r.matches(geography)) {
                    matched = true;
                    for (total, count) in totals.iter_mut().zip(&region.counts) {
                        *total += count;
                    }
                }

                if matched {
                    Ok(totals)
                } else {
                    Err(not_found(self, geography))
                }
            }
        }
    }

    /// Table dates zipped with [`TimeSeriesTable::num_cases`].
    pub fn series(&self, geography: &Geography) -> Result<Series> {
        let values = self.num_cases(geography)?;
        Ok(Series {
            dates: self.dates().to_vec(),
            values,
        })
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.regions()
            .iter()
            .map(|region| region.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn not_found(table: &TimeSeriesTable, geography: &Geography) -> CovError {
    CovError::not_found(format!(
        "{} in the {} table",
        geography.title(),
        table.case_type()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use covtrend_common::test_utils::csv_fixtures;
    use covtrend_common::CaseType;

    fn confirmed() -> TimeSeriesTable {
        TimeSeriesTable::from_csv_str(CaseType::Confirmed, &csv_fixtures::confirmed_csv()).unwrap()
    }

    #[test]
    fn test_country_sums_provinces() {
        let table = confirmed();
        let australia = table.num_cases(&Geography::country("Australia")).unwrap();
        assert_eq!(australia, vec![1, 7, 30, 110, 260, 460]);
    }

    #[test]
    fn test_province_picks_single_row() {
        let table = confirmed();
        let victoria = table
            .num_cases(&Geography::province("Australia", "Victoria"))
            .unwrap();
        assert_eq!(victoria, vec![1, 4, 10, 40, 110, 200]);
    }

    #[test]
    fn test_country_with_comma() {
        let table = confirmed();
        let korea = table.num_cases(&Geography::country("Korea, South")).unwrap();
        assert_eq!(korea, vec![5, 15, 60, 90, 130, 160]);
    }

    #[test]
    fn test_unknown_geography() {
        let table = confirmed();
        assert!(table
            .num_cases(&Geography::country("Atlantis"))
            .unwrap_err()
            .is_not_found());
        assert!(table
            .num_cases(&Geography::province("Italy", "Lombardy"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_series() {
        let table = confirmed();
        let series = table.series(&Geography::country("Italy")).unwrap();
        assert_eq!(series.len(), csv_fixtures::DATE_COUNT);
        assert_eq!(series.dates, table.dates());

        let (date, value) = series.last().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 3).unwrap());
        assert_eq!(value, 700);
        assert_eq!(series.points().nth(2).map(|(_, v)| v), Some(50));
    }

    #[test]
    fn test_countries_sorted_and_distinct() {
        let table = confirmed();
        assert_eq!(
            table.countries(),
            vec!["Australia", "Italy", "Korea, South", "Slovakia"]
        );
    }
}
