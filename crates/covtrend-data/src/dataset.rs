//! The three source tables and the tables derived from them.

use crate::derive;
use crate::table::TimeSeriesTable;
use covtrend_common::{CaseType, CovError, Result};
use std::borrow::Cow;
use std::path::Path;

/// Parsed confirmed, recovered and deaths tables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub confirmed: TimeSeriesTable,
    pub recovered: TimeSeriesTable,
    pub deaths: TimeSeriesTable,
}

impl Dataset {
    /// Bundle three tables, checking each holds the expected case type.
    pub fn new(
        confirmed: TimeSeriesTable,
        recovered: TimeSeriesTable,
        deaths: TimeSeriesTable,
    ) -> Result<Self> {
        for (table, expected) in [
            (&confirmed, CaseType::Confirmed),
            (&recovered, CaseType::Recovered),
            (&deaths, CaseType::Deaths),
        ] {
            if table.case_type() != expected {
                return Err(CovError::data(format!(
                    "expected a {expected} table, got {}",
                    table.case_type()
                )));
            }
        }

        Ok(Self {
            confirmed,
            recovered,
            deaths,
        })
    }

    /// Parse the cached `{confirmed,recovered,death}.csv` files in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let load = |case_type: CaseType| {
            TimeSeriesTable::from_path(case_type, dir.join(cache_file_name(case_type)))
        };

        Self::new(
            load(CaseType::Confirmed)?,
            load(CaseType::Recovered)?,
            load(CaseType::Deaths)?,
        )
    }

    /// The table for `case_type`; active and daily-new are computed on each call.
    pub fn get(&self, case_type: CaseType) -> Result<Cow<'_, TimeSeriesTable>> {
        Ok(match case_type {
            CaseType::Confirmed => Cow::Borrowed(&self.confirmed),
            CaseType::Recovered => Cow::Borrowed(&self.recovered),
            CaseType::Deaths => Cow::Borrowed(&self.deaths),
            CaseType::Active => {
                Cow::Owned(derive::active(&self.confirmed, &self.recovered, &self.deaths)?)
            }
            CaseType::DailyNew => Cow::Owned(derive::daily_new(&self.confirmed)?),
        })
    }
}

/// Cache file name for a source case type, e.g. `death.csv`.
pub fn cache_file_name(case_type: CaseType) -> String {
    format!("{}.csv", case_type.as_str())
}
