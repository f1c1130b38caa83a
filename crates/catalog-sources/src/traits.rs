use async_trait::async_trait;
use catalog_models::Row;
use crate::SourceError;

/// Something that can hand over the sheet's rows, in sheet order.
#[async_trait]
pub trait RowSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_rows(&self) -> Result<Vec<Row>, SourceError>;
}
