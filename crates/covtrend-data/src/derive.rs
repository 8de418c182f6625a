//! Tables computed from the downloaded cumulative tables.

use crate::table::{Region, TimeSeriesTable};
use covtrend_common::{CaseType, CovError, Geography, Result};
use std::collections::HashMap;
use tracing::debug;

type RegionKey<'a> = (&'a str, Option<&'a str>);

/// Active cases: `confirmed - recovered - deaths` per region.
///
/// Regions are lined up by (country, province) rather than row position.
/// When a country's rows don't line up across the three tables (provinces
/// in one, a single national row in another) the country gets one
/// country-level row of totals instead. A country missing from any input is
/// dropped. Negative results are kept.
pub fn active(
    confirmed: &TimeSeriesTable,
    recovered: &TimeSeriesTable,
    deaths: &TimeSeriesTable,
) -> Result<TimeSeriesTable> {
    ensure_same_dates(confirmed, recovered)?;
    ensure_same_dates(confirmed, deaths)?;

    let recovered_by_key = index(recovered);
    let deaths_by_key = index(deaths);

    let mut matched = Vec::with_capacity(confirmed.len());
    let mut unmatched: Vec<&str> = Vec::new();
    for region in confirmed.regions() {
        let key = region.key();
        match (recovered_by_key.get(&key), deaths_by_key.get(&key)) {
            (Some(rec), Some(dead)) => matched.push(Region {
                counts: subtract(&region.counts, &rec.counts, &dead.counts),
                ..region.clone()
            }),
            _ => {
                if !unmatched.contains(&region.country.as_str()) {
                    unmatched.push(&region.country);
                }
            }
        }
    }

    let mut regions: Vec<Region> = matched
        .into_iter()
        .filter(|region| !unmatched.contains(&region.country.as_str()))
        .collect();

    for country in unmatched {
        let geography = Geography::country(country);
        let totals = (
            confirmed.num_cases(&geography),
            recovered.num_cases(&geography),
            deaths.num_cases(&geography),
        );
        match totals {
            (Ok(c), Ok(r), Ok(d)) => {
                debug!(country, "Provinces don't line up, using country totals");
                regions.push(Region {
                    province: None,
                    country: country.to_string(),
                    lat: None,
                    long: None,
                    counts: subtract(&c, &r, &d),
                });
            }
            _ => debug!(country, "Dropping country without recovered or deaths rows"),
        }
    }

    TimeSeriesTable::new(CaseType::Active, confirmed.dates().to_vec(), regions)
}

fn subtract(confirmed: &[i64], recovered: &[i64], deaths: &[i64]) -> Vec<i64> {
    confirmed
        .iter()
        .zip(recovered)
        .zip(deaths)
        .map(|((c, r), d)| c - r - d)
        .collect()
}

/// Daily new cases from a cumulative table.
///
/// The first date keeps its cumulative value.
pub fn daily_new(confirmed: &TimeSeriesTable) -> Result<TimeSeriesTable> {
    let regions = confirmed
        .regions()
        .iter()
        .map(|region| Region {
            counts: differences(&region.counts),
            ..region.clone()
        })
        .collect();

    TimeSeriesTable::new(CaseType::DailyNew, confirmed.dates().to_vec(), regions)
}

/// First value as is, then successive differences.
pub fn differences(cumulative: &[i64]) -> Vec<i64> {
    let mut previous = 0;
    cumulative
        .iter()
        .map(|&value| {
            let diff = value - previous;
            previous = value;
            diff
        })
        .collect()
}

fn index(table: &TimeSeriesTable) -> HashMap<RegionKey<'_>, &Region> {
    let mut by_key = HashMap::with_capacity(table.len());
    for region in table.regions() {
        // first row wins on duplicate keys
        by_key.entry(region.key()).or_insert(region);
    }
    by_key
}

fn ensure_same_dates(left: &TimeSeriesTable, right: &TimeSeriesTable) -> Result<()> {
    if left.dates() == right.dates() {
        Ok(())
    } else {
        Err(CovError::data(format!(
            "{} and {} tables have different date columns",
            left.case_type(),
            right.case_type()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covtrend_common::test_utils::csv_fixtures;

    fn table(case_type: CaseType, csv: &str) -> TimeSeriesTable {
        TimeSeriesTable::from_csv_str(case_type, csv).unwrap()
    }

    #[test]
    fn test_active_matches_rows_by_key() {
        let confirmed = table(CaseType::Confirmed, &csv_fixtures::confirmed_csv());
        let recovered = table(CaseType::Recovered, &csv_fixtures::recovered_csv());
        let deaths = table(CaseType::Deaths, &csv_fixtures::deaths_csv());

        let active = active(&confirmed, &recovered, &deaths).unwrap();
        assert_eq!(active.case_type(), CaseType::Active);
        assert_eq!(active.len(), 5);

        // recovered lists Korea first; positional subtraction would give Italy - Korea
        let italy = active.num_cases(&Geography::country("Italy")).unwrap();
        assert_eq!(italy, vec![0, 2, 49, 105, 254, 600]);

        let victoria = active
            .num_cases(&Geography::province("Australia", "Victoria"))
            .unwrap();
        assert_eq!(victoria, vec![1, 3, 8, 35, 99, 178]);
    }

    #[test]
    fn test_active_drops_unmatched_regions() {
        let header = "Province/State,Country/Region,Lat,Long,3/1/20,3/2/20";
        let confirmed = table(
            CaseType::Confirmed,
            &format!("{header}\n,Peru,1,1,5,9\n,Chile,1,1,4,8\n"),
        );
        let recovered = table(CaseType::Recovered, &format!("{header}\n,Peru,1,1,1,2\n"));
        let deaths = table(
            CaseType::Deaths,
            &format!("{header}\n,Chile,1,1,0,0\n,Peru,1,1,0,1\n"),
        );

        let active = active(&confirmed, &recovered, &deaths).unwrap();
        assert_eq!(active.countries(), vec!["Peru"]);
        assert_eq!(active.regions()[0].counts, vec![4, 6]);
    }

    #[test]
    fn test_active_falls_back_to_country_totals() {
        let header = "Province/State,Country/Region,Lat,Long,3/1/20,3/2/20";
        let confirmed = table(
            CaseType::Confirmed,
            &format!("{header}\nOntario,Canada,1,1,10,20\nQuebec,Canada,1,1,5,15\n,Peru,1,1,5,9\n"),
        );
        let recovered = table(
            CaseType::Recovered,
            &format!("{header}\n,Canada,1,1,2,4\n,Peru,1,1,1,2\n"),
        );
        let deaths = table(
            CaseType::Deaths,
            &format!("{header}\nOntario,Canada,1,1,1,1\nQuebec,Canada,1,1,0,2\n,Peru,1,1,0,1\n"),
        );

        let active = active(&confirmed, &recovered, &deaths).unwrap();
        let canada = active.num_cases(&Geography::country("Canada")).unwrap();
        assert_eq!(canada, vec![12, 28]);
        assert!(active
            .num_cases(&Geography::province("Canada", "Ontario"))
            .unwrap_err()
            .is_not_found());
        assert_eq!(active.num_cases(&Geography::country("Peru")).unwrap(), vec![4, 6]);
    }

    #[test]
    fn test_active_keeps_negative_values() {
        let header = "Province/State,Country/Region,Lat,Long,3/1/20";
        let confirmed = table(CaseType::Confirmed, &format!("{header}\n,Peru,1,1,5\n"));
        let recovered = table(CaseType::Recovered, &format!("{header}\n,Peru,1,1,9\n"));
        let deaths = table(CaseType::Deaths, &format!("{header}\n,Peru,1,1,1\n"));

        let active = active(&confirmed, &recovered, &deaths).unwrap();
        assert_eq!(active.regions()[0].counts, vec![-5]);
    }

    #[test]
    fn test_active_rejects_mismatched_dates() {
        let confirmed = table(
            CaseType::Confirmed,
            "Province/State,Country/Region,Lat,Long,3/1/20,3/2/20\n,Peru,1,1,5,6\n",
        );
        let other = table(
            CaseType::Recovered,
            "Province/State,Country/Region,Lat,Long,3/1/20,3/3/20\n,Peru,1,1,1,1\n",
        );

        let err = active(&confirmed, &other, &confirmed).unwrap_err();
        assert!(matches!(err, CovError::Data { .. }));
    }

    #[test]
    fn test_daily_new() {
        let confirmed = table(CaseType::Confirmed, &csv_fixtures::confirmed_csv());
        let daily = daily_new(&confirmed).unwrap();
        assert_eq!(daily.case_type(), CaseType::DailyNew);

        let italy = daily.num_cases(&Geography::country("Italy")).unwrap();
        assert_eq!(italy, vec![0, 2, 48, 70, 180, 400]);

        let korea = daily.num_cases(&Geography::country("Korea, South")).unwrap();
        assert_eq!(korea[0], 5);
    }

    #[test]
    fn test_differences() {
        assert_eq!(differences(&[]), Vec::<i64>::new());
        assert_eq!(differences(&[3]), vec![3]);
        assert_eq!(differences(&[3, 3, 10, 8]), vec![3, 0, 7, -2]);
    }
}
