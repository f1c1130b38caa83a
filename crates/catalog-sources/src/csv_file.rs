use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catalog_models::{CellValue, Row};
use csv::ReaderBuilder;
use tracing::debug;

use crate::{RowSource, SourceError};

/// A CSV export on disk, header row first.
pub struct CsvFileSource {
    path: PathBuf,
    infer_numbers: bool,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, infer_numbers: bool) -> Self {
        Self {
            path: path.into(),
            infer_numbers,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RowSource for CsvFileSource {
    fn source_name(&self) -> &str {
        "csv"
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::io(&self.path, e))?;
        let rows = parse_csv(bytes.as_slice(), self.infer_numbers)?;
        debug!(path = %self.path.display(), rows = rows.len(), "Read CSV rows");
        Ok(rows)
    }
}

/// Parse CSV text into rows keyed by the header labels.
///
/// Short records are padded with empty cells and rows with nothing but blank
/// cells are dropped.
pub fn parse_csv<R: Read>(reader: R, infer_numbers: bool) -> Result<Vec<Row>, SourceError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    debug!("CSV columns: {:?}", headers.iter().collect::<Vec<_>>());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, label)| (label, parse_cell(record.get(i).unwrap_or(""), infer_numbers)))
            .collect();
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn parse_cell(raw: &str, infer_numbers: bool) -> CellValue {
    let trimmed = raw.trim();
    match trimmed {
        "" => CellValue::Empty,
        "TRUE" => CellValue::Bool(true),
        "FALSE" => CellValue::Bool(false),
        _ if infer_numbers && looks_numeric(trimmed) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or_else(|| CellValue::Text(raw.to_string()), CellValue::Number),
        _ => CellValue::Text(raw.to_string()),
    }
}

// f64's parser also takes "inf", "NaN" and friends
fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}
