//! Downloading the source tables into the local data directory.

use crate::dataset::{cache_file_name, Dataset};
use crate::table::TimeSeriesTable;
use covtrend_common::{CaseType, CovError, Result};
use covtrend_config::DataConfig;
use reqwest::Client;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Where one source table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http://` or `https://` URL.
    Http(String),
    /// `file://` URL or plain path.
    Local(PathBuf),
}

impl Source {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Http(raw.to_string())
        } else if let Some(path) = raw.strip_prefix("file://") {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Local(PathBuf::from(raw))
        }
    }
}

/// Fetches the confirmed, recovered and deaths tables into `data_dir`.
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    client: Client,
    config: DataConfig,
}

impl DatasetFetcher {
    /// Create a fetcher with an HTTP client using the configured timeout.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CovError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Configured source for a downloadable case type.
    pub fn source(&self, case_type: CaseType) -> Result<Source> {
        let raw = match case_type {
            CaseType::Confirmed => &self.config.confirmed_url,
            CaseType::Recovered => &self.config.recovered_url,
            CaseType::Deaths => &self.config.deaths_url,
            CaseType::Active | CaseType::DailyNew => {
                return Err(CovError::validation_field(
                    format!("{case_type} is derived and has no source file"),
                    "case_type",
                ))
            }
        };
        Ok(Source::parse(raw))
    }

    /// Local cache path of a source table.
    pub fn cache_path(&self, case_type: CaseType) -> PathBuf {
        self.config.data_dir.join(cache_file_name(case_type))
    }

    /// Fetch one source table into the data directory and return its path.
    ///
    /// Offline mode returns the cached file, or `NotFound` when there is none.
    #[instrument(skip(self), fields(case_type = %case_type))]
    pub async fn fetch(&self, case_type: CaseType) -> Result<PathBuf> {
        let source = self.source(case_type)?;
        let dest = self.cache_path(case_type);

        if self.config.offline {
            return if fs::try_exists(&dest).await? {
                debug!("Offline, using cached {}", dest.display());
                Ok(dest)
            } else {
                Err(CovError::not_found(format!(
                    "cached {} data at {}",
                    case_type,
                    dest.display()
                )))
            };
        }

        fs::create_dir_all(&self.config.data_dir).await?;

        match &source {
            Source::Http(url) => {
                debug!("Downloading {}", url);
                let response = self.client.get(url).send().await?.error_for_status()?;
                let bytes = response.bytes().await?;
                fs::write(&dest, &bytes).await?;
            }
            Source::Local(path) => copy_local(path, &dest).await?,
        }

        info!("Fetched {} data into {}", case_type, dest.display());
        Ok(dest)
    }

    /// Fetch and parse all three source tables.
    pub async fn fetch_all(&self) -> Result<Dataset> {
        let (confirmed, recovered, deaths) = tokio::try_join!(
            self.fetch(CaseType::Confirmed),
            self.fetch(CaseType::Recovered),
            self.fetch(CaseType::Deaths),
        )?;

        Dataset::new(
            TimeSeriesTable::from_path(CaseType::Confirmed, confirmed)?,
            TimeSeriesTable::from_path(CaseType::Recovered, recovered)?,
            TimeSeriesTable::from_path(CaseType::Deaths, deaths)?,
        )
    }
}

async fn copy_local(from: &Path, to: &Path) -> Result<()> {
    // copying a file onto itself would truncate it
    if fs::try_exists(to).await?
        && fs::canonicalize(from).await.ok() == fs::canonicalize(to).await.ok()
    {
        return Ok(());
    }

    fs::copy(from, to).await.map(|_| ()).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CovError::not_found(format!("source file {}", from.display()))
        } else {
            CovError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use covtrend_common::test_utils::{create_temp_dir, csv_fixtures};

    fn local_config(data_dir: &Path, sources: &Path) -> DataConfig {
        DataConfig {
            confirmed_url: format!("file://{}", sources.join("c.csv").display()),
            recovered_url: sources.join("r.csv").display().to_string(),
            deaths_url: format!("file://{}", sources.join("d.csv").display()),
            data_dir: data_dir.to_path_buf(),
            offline: false,
            timeout_seconds: 5,
        }
    }

    fn write_sources(dir: &Path) {
        std::fs::write(dir.join("c.csv"), csv_fixtures::confirmed_csv()).unwrap();
        std::fs::write(dir.join("r.csv"), csv_fixtures::recovered_csv()).unwrap();
        std::fs::write(dir.join("d.csv"), csv_fixtures::deaths_csv()).unwrap();
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            Source::parse("https://example.com/a.csv"),
            Source::Http("https://example.com/a.csv".to_string())
        );
        assert_eq!(
            Source::parse("file:///tmp/a.csv"),
            Source::Local(PathBuf::from("/tmp/a.csv"))
        );
        assert_eq!(
            Source::parse(" data/a.csv "),
            Source::Local(PathBuf::from("data/a.csv"))
        );
    }

    #[tokio::test]
    async fn test_fetch_all_from_local_files() {
        let sources = create_temp_dir();
        let data = create_temp_dir();
        write_sources(sources.path());

        let data_dir = data.path().join("nested");
        let fetcher = DatasetFetcher::new(&local_config(&data_dir, sources.path())).unwrap();

        let path = fetcher.fetch(CaseType::Deaths).await.unwrap();
        assert_eq!(path, data_dir.join("death.csv"));
        assert!(path.exists());

        let dataset = fetcher.fetch_all().await.unwrap();
        assert_eq!(dataset.recovered.len(), 5);
        assert!(data_dir.join("confirmed.csv").exists());
        assert!(data_dir.join("recovered.csv").exists());
    }

    #[tokio::test]
    async fn test_offline_uses_cache() {
        let sources = create_temp_dir();
        let data = create_temp_dir();
        write_sources(sources.path());

        let mut config = local_config(data.path(), sources.path());
        config.offline = true;
        let fetcher = DatasetFetcher::new(&config).unwrap();

        let err = fetcher.fetch(CaseType::Confirmed).await.unwrap_err();
        assert!(err.is_not_found());

        std::fs::write(data.path().join("confirmed.csv"), csv_fixtures::confirmed_csv()).unwrap();
        let path = fetcher.fetch(CaseType::Confirmed).await.unwrap();
        assert_eq!(path, data.path().join("confirmed.csv"));
    }

    #[tokio::test]
    async fn test_missing_local_source() {
        let sources = create_temp_dir();
        let data = create_temp_dir();
        let fetcher = DatasetFetcher::new(&local_config(data.path(), sources.path())).unwrap();

        let err = fetcher.fetch(CaseType::Recovered).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_source_already_in_cache_is_kept() {
        let data = create_temp_dir();
        write_sources(data.path());
        std::fs::rename(data.path().join("c.csv"), data.path().join("confirmed.csv")).unwrap();

        let mut config = local_config(data.path(), data.path());
        config.confirmed_url = data.path().join("confirmed.csv").display().to_string();
        let fetcher = DatasetFetcher::new(&config).unwrap();

        let path = fetcher.fetch(CaseType::Confirmed).await.unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, csv_fixtures::confirmed_csv());
    }

    #[test]
    fn test_derived_types_have_no_source() {
        let fetcher = DatasetFetcher::new(&DataConfig::default()).unwrap();
        assert!(fetcher.source(CaseType::Active).is_err());
        assert!(matches!(
            fetcher.source(CaseType::Confirmed).unwrap(),
            Source::Http(_)
        ));
        assert_eq!(
            fetcher.cache_path(CaseType::Deaths),
            PathBuf::from("data").join("death.csv")
        );
    }
}
