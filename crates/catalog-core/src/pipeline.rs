use catalog_config::ColumnConfig;
use catalog_models::{Catalog, Row, SkippedRow};
use tracing::info;

use crate::aggregator::CatalogBuilder;
use crate::policy::MergePolicy;

/// A finished catalog together with the rows that contributed nothing.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRow>,
}

/// Build a catalog from sheet rows in order.
///
/// `updated` is stored verbatim as the catalog's generation marker. The same
/// rows, columns, policy and marker always produce the same catalog.
pub fn aggregate<'r, I>(rows: I, columns: &ColumnConfig, policy: &MergePolicy, updated: &str) -> Aggregation
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut builder = CatalogBuilder::new(columns, policy);
    for row in rows {
        builder.push_row(row);
    }
    let rows_seen = builder.rows_seen();
    let result = builder.finish(updated);

    info!(
        operation = "aggregate",
        rows = rows_seen,
        movies = result.catalog.movies.len(),
        episodes = result.catalog.episode_count(),
        banners = result.catalog.banners.len(),
        skipped = result.skipped.len(),
        "Catalog aggregated"
    );
    result
}
