use std::path::PathBuf;

use async_trait::async_trait;
use catalog_models::{CellValue, Row};
use serde_json::Value;
use tracing::debug;

use crate::{RowSource, SourceError};

/// A JSON array of `{label: value}` objects, e.g. a "get all records" dump.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RowSource for JsonFileSource {
    fn source_name(&self) -> &str {
        "json"
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::io(&self.path, e))?;
        let rows = parse_json_rows(&bytes)?;
        debug!(path = %self.path.display(), rows = rows.len(), "Read JSON rows");
        Ok(rows)
    }
}

/// Parse a JSON array of objects, keeping each object's key order.
pub fn parse_json_rows(bytes: &[u8]) -> Result<Vec<Row>, SourceError> {
    let records: Vec<Value> = serde_json::from_slice(bytes)?;
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let Value::Object(map) = record else {
                return Err(SourceError::InvalidRow {
                    row,
                    message: "expected an object of column label to value".to_string(),
                });
            };
            map.into_iter()
                .map(|(label, value)| {
                    let cell = to_cell(value).ok_or_else(|| SourceError::InvalidRow {
                        row,
                        message: format!("column {:?} holds a non-scalar value", label),
                    })?;
                    Ok((label, cell))
                })
                .collect::<Result<Row, SourceError>>()
        })
        .collect()
}

fn to_cell(value: Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Empty),
        Value::Bool(b) => Some(CellValue::Bool(b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::Text(s)),
        Value::Array(_) | Value::Object(_) => None,
    }
}
