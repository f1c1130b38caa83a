use catalog_config::ColumnConfig;
use catalog_models::{CellValue, Movie, Row};

/// Movie-level values one row carries. Blank cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFields {
    pub viet_name: Option<String>,
    pub summary: Option<String>,
    pub rank: Option<u32>,
    pub poster: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
    pub allow_pc: bool,
}

impl MovieFields {
    pub fn from_row(row: &Row, columns: &ColumnConfig) -> Self {
        Self {
            viet_name: row.lookup_text(&columns.viet_name),
            summary: row.lookup_text(&columns.summary),
            rank: row.lookup(&columns.rank).and_then(parse_rank),
            poster: row
                .columns_containing(&columns.poster_label)
                .find_map(CellValue::as_text),
            year: row.lookup_text(&columns.year),
            genre: row.lookup_text(&columns.genre),
            country: row.lookup_text(&columns.country),
            allow_pc: row.lookup(&columns.allow_pc).is_some_and(CellValue::is_truthy),
        }
    }
}

/// Rank as a positive integer; anything else is ignored.
pub fn parse_rank(cell: &CellValue) -> Option<u32> {
    cell.as_integer()
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
}

/// Fold one row's fields into a movie, each field by its own rule.
pub fn merge_metadata(movie: &mut Movie, fields: &MovieFields) {
    // last non-empty wins
    if let Some(ref v) = fields.viet_name {
        movie.viet_name = v.clone();
    }
    if let Some(ref v) = fields.year {
        movie.year = v.clone();
    }
    if let Some(ref v) = fields.genre {
        movie.genre = v.clone();
    }
    if let Some(ref v) = fields.country {
        movie.country = v.clone();
    }

    // first non-empty wins
    if movie.summary.is_empty() {
        if let Some(ref v) = fields.summary {
            movie.summary = v.clone();
        }
    }
    if movie.poster.is_empty() {
        if let Some(ref v) = fields.poster {
            movie.poster = v.clone();
        }
    }

    // smaller rank means higher priority
    if let Some(rank) = fields.rank {
        movie.rank = Some(movie.rank.map_or(rank, |current| current.min(rank)));
    }

    if fields.allow_pc {
        movie.allow_pc = true;
    }
}
