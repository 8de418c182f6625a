//! Custom validation functions for configuration fields.

use std::path::Path;
use validator::ValidationError;

/// Log level must be one of the tracing level names.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// A dataset source is an `http(s)://` URL, a `file://` URL or a plain path.
pub fn validate_source(source: &str) -> Result<(), ValidationError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ValidationError::new("empty_source"));
    }

    match source.split_once("://") {
        None => Ok(()),
        Some(("http" | "https", rest)) | Some(("file", rest)) if !rest.is_empty() => Ok(()),
        Some(_) => Err(ValidationError::new("unsupported_scheme")),
    }
}

/// Image paths must carry an extension the renderer can write.
pub fn validate_image_path(path: &Path) -> Result<(), ValidationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") || ext.eq_ignore_ascii_case("svg") => Ok(()),
        _ => Err(ValidationError::new("unsupported_image_extension")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_source() {
        assert!(validate_source("https://raw.githubusercontent.com/x/y.csv").is_ok());
        assert!(validate_source("http://localhost:8080/deaths.csv").is_ok());
        assert!(validate_source("file:///tmp/confirmed.csv").is_ok());
        assert!(validate_source("data/confirmed.csv").is_ok());

        assert!(validate_source("").is_err());
        assert!(validate_source("   ").is_err());
        assert!(validate_source("ftp://example.com/x.csv").is_err());
        assert!(validate_source("https://").is_err());
    }

    #[test]
    fn test_validate_image_path() {
        assert!(validate_image_path(Path::new("corona_deaths.png")).is_ok());
        assert!(validate_image_path(Path::new("out/chart.SVG")).is_ok());
        assert!(validate_image_path(Path::new("chart.pdf")).is_err());
        assert!(validate_image_path(Path::new("chart")).is_err());
    }
}
