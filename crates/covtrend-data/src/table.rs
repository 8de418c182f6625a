//! Wide time-series tables: one row per region, one column per date.

use chrono::NaiveDate;
use covtrend_common::{CaseType, CovError, Geography, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::debug;

/// Identifier columns that precede the date columns, lowercased.
pub const ID_COLUMNS: [&str; 4] = ["province/state", "country/region", "lat", "long"];

/// Date format of the column headers, e.g. `1/22/20`.
pub const DATE_HEADER_FORMAT: &str = "%m/%d/%y";

/// One row of a time-series table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub province: Option<String>,
    pub country: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    /// One value per table date.
    pub counts: Vec<i64>,
}

impl Region {
    /// Key used to line up the same region across tables.
    pub fn key(&self) -> (&str, Option<&str>) {
        (self.country.as_str(), self.province.as_deref())
    }

    /// Whether this row belongs to `geography`.
    ///
    /// A country-level geography matches every province of that country.
    pub fn matches(&self, geography: &Geography) -> bool {
        if self.country != geography.country {
            return false;
        }
        match &geography.province {
            None => true,
            Some(province) => self.province.as_deref() == Some(province.as_str()),
        }
    }
}

/// A parsed time-series table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    case_type: CaseType,
    dates: Vec<NaiveDate>,
    regions: Vec<Region>,
}

impl TimeSeriesTable {
    /// Build a table, checking that dates increase and every row has one value per date.
    pub fn new(case_type: CaseType, dates: Vec<NaiveDate>, regions: Vec<Region>) -> Result<Self> {
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(CovError::data(format!(
                "{} dates are not strictly increasing: {} is followed by {}",
                case_type, pair[0], pair[1]
            )));
        }

        if let Some(region) = regions.iter().find(|r| r.counts.len() != dates.len()) {
            return Err(CovError::data(format!(
                "{} row for {} has {} values but the table has {} dates",
                case_type,
                region.country,
                region.counts.len(),
                dates.len()
            )));
        }

        Ok(Self {
            case_type,
            dates,
            regions,
        })
    }

    /// Parse a CSV document in the global time-series layout.
    pub fn parse<R: io::Read>(case_type: CaseType, reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        if headers.len() < ID_COLUMNS.len() {
            return Err(CovError::parse(
                format!(
                    "expected at least {} columns, found {}",
                    ID_COLUMNS.len(),
                    headers.len()
                ),
                Some(1),
            ));
        }

        for (found, expected) in headers.iter().zip(ID_COLUMNS) {
            if found != expected {
                return Err(CovError::parse(
                    format!("expected column '{expected}', found '{found}'"),
                    Some(1),
                ));
            }
        }

        let dates = headers[ID_COLUMNS.len()..]
            .iter()
            .map(|h| {
                NaiveDate::parse_from_str(h, DATE_HEADER_FORMAT).map_err(|e| {
                    CovError::parse_with_source(format!("invalid date header '{h}'"), Some(1), e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut regions = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line());

            let province = non_empty(record.get(0));
            let country = non_empty(record.get(1))
                .ok_or_else(|| CovError::parse("missing country/region", line))?;
            let lat = parse_coordinate(record.get(2), "lat", line)?;
            let long = parse_coordinate(record.get(3), "long", line)?;

            let counts = record
                .iter()
                .skip(ID_COLUMNS.len())
                .map(|cell| parse_count(cell, line))
                .collect::<Result<Vec<_>>>()?;

            regions.push(Region {
                province,
                country,
                lat,
                long,
                counts,
            });
        }

        debug!(
            case_type = %case_type,
            regions = regions.len(),
            dates = dates.len(),
            "Parsed time-series table"
        );

        Self::new(case_type, dates, regions)
    }

    /// Parse a CSV document held in memory.
    pub fn from_csv_str(case_type: CaseType, content: &str) -> Result<Self> {
        Self::parse(case_type, content.as_bytes())
    }

    /// Parse a CSV file from disk.
    pub fn from_path(case_type: CaseType, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CovError::not_found(format!("dataset file {}", path.display()))
            } else {
                CovError::Io(e)
            }
        })?;
        Self::parse(case_type, io::BufReader::new(file))
    }

    pub fn case_type(&self) -> CaseType {
        self.case_type
    }

    /// Column dates in increasing order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions (rows).
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_coordinate(cell: Option<&str>, column: &str, line: Option<u64>) -> Result<Option<f64>> {
    match cell.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<f64>().map(Some).map_err(|e| {
            CovError::parse_with_source(format!("invalid {column} '{raw}'"), line, e)
        }),
    }
}

/// Counts are integers; blank cells are 0 and integral floats such as `12.0` are accepted.
fn parse_count(cell: &str, line: Option<u64>) -> Result<i64> {
    let raw = cell.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        Ok(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        _ => Err(CovError::parse(format!("invalid count '{raw}'"), line)),
    }
}
