//! Test utilities and shared fixtures for the covtrend workspace.
//!
//! Enabled for other crates through the `testing` feature so that the same
//! small JHU-shaped CSV files back unit and integration tests everywhere.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests once per process, routed through the test writer.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "testing")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Small CSV files in the global time-series layout.
///
/// Six dates from 2020-01-29 to 2020-02-03. Australia is split into two
/// provinces, everything else is a single country-level row. The recovered
/// file lists its rows in a different order than the other two.
pub mod csv_fixtures {
    /// Header shared by all fixtures.
    pub const HEADER: &str = "Province/State,Country/Region,Lat,Long,1/29/20,1/30/20,1/31/20,2/1/20,2/2/20,2/3/20";

    /// Number of date columns in every fixture.
    pub const DATE_COUNT: usize = 6;

    /// Cumulative confirmed cases.
    pub fn confirmed_csv() -> String {
        format!(
            "{HEADER}\n\
             ,Italy,41.87,12.56,0,2,50,120,300,700\n\
             Victoria,Australia,-37.81,144.96,1,4,10,40,110,200\n\
             New South Wales,Australia,-33.86,151.2,0,3,20,70,150,260\n\
             ,\"Korea, South\",35.9,127.7,5,15,60,90,130,160\n\
             ,Slovakia,48.6,19.6,0,0,0,0,1,2\n"
        )
    }

    /// Cumulative recoveries; row order differs from the other fixtures.
    pub fn recovered_csv() -> String {
        format!(
            "{HEADER}\n\
             ,\"Korea, South\",35.9,127.7,0,1,5,10,20,30\n\
             ,Slovakia,48.6,19.6,0,0,0,0,0,1\n\
             New South Wales,Australia,-33.86,151.2,0,0,1,2,3,4\n\
             ,Italy,41.87,12.56,0,0,0,10,20,40\n\
             Victoria,Australia,-37.81,144.96,0,1,2,5,10,20\n"
        )
    }

    /// Cumulative deaths.
    pub fn deaths_csv() -> String {
        format!(
            "{HEADER}\n\
             ,Italy,41.87,12.56,0,0,1,5,26,60\n\
             Victoria,Australia,-37.81,144.96,0,0,0,0,1,2\n\
             New South Wales,Australia,-33.86,151.2,0,0,0,1,2,3\n\
             ,\"Korea, South\",35.9,127.7,0,0,0,0,1,1\n\
             ,Slovakia,48.6,19.6,0,0,0,0,0,0\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_have_consistent_shape() {
        for csv in [
            csv_fixtures::confirmed_csv(),
            csv_fixtures::recovered_csv(),
            csv_fixtures::deaths_csv(),
        ] {
            let lines: Vec<&str> = csv.lines().collect();
            assert_eq!(lines.len(), 6);
            assert_eq!(lines[0], csv_fixtures::HEADER);
        }
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0 + 1e-12, 1e-9);
    }
}
