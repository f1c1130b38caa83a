use std::path::Path;
use std::time::Duration;

use catalog_config::{SourceConfig, SourceKind};

use crate::{CsvFileSource, CsvUrlSource, JsonFileSource, RowSource, SourceError};

/// Builds the configured [`RowSource`].
pub struct SourceFactory;

impl SourceFactory {
    pub fn from_config(config: &SourceConfig) -> Result<Box<dyn RowSource>, SourceError> {
        match config.kind {
            SourceKind::Csv => {
                let path = config
                    .path
                    .as_ref()
                    .ok_or_else(|| SourceError::NotConfigured("source.path is required for csv sources".to_string()))?;
                Ok(Box::new(CsvFileSource::new(path, config.infer_numbers)))
            }
            SourceKind::Json => {
                let path = config
                    .path
                    .as_ref()
                    .ok_or_else(|| SourceError::NotConfigured("source.path is required for json sources".to_string()))?;
                Ok(Box::new(JsonFileSource::new(path)))
            }
            SourceKind::CsvUrl => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or_else(|| SourceError::NotConfigured("source.url is required for csv_url sources".to_string()))?;
                Ok(Box::new(CsvUrlSource::new(
                    url,
                    config.infer_numbers,
                    Duration::from_secs(config.timeout_seconds),
                )?))
            }
        }
    }

    /// Source kind implied by a file's extension: `.json` is JSON, anything
    /// else is treated as CSV.
    pub fn kind_for_path(path: &Path) -> SourceKind {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceKind::Json,
            _ => SourceKind::Csv,
        }
    }
}
