use std::time::Duration;

use async_trait::async_trait;
use catalog_models::Row;
use reqwest::Client;
use tracing::{debug, info};

use crate::csv_file::parse_csv;
use crate::{RowSource, SourceError};

/// A published CSV export fetched over HTTP(S), e.g. a sheet's
/// `export?format=csv` link.
pub struct CsvUrlSource {
    url: String,
    infer_numbers: bool,
    client: Client,
}

impl CsvUrlSource {
    pub fn new(url: impl Into<String>, infer_numbers: bool, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sheetreel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            infer_numbers,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RowSource for CsvUrlSource {
    fn source_name(&self) -> &str {
        "csv_url"
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        info!(url = %self.url, "Downloading sheet export");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        debug!(url = %self.url, bytes = body.len(), "Sheet export downloaded");
        parse_csv(&body[..], self.infer_numbers)
    }
}
