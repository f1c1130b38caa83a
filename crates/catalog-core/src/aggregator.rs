use std::collections::HashMap;

use catalog_config::ColumnConfig;
use catalog_models::{Episode, Movie, Row, SkipReason, SkippedRow};
use tracing::{debug, trace};

use crate::banners::{BannerRegistry, BannerUpdate};
use crate::classify::{banner_url, classify_row, RowClass};
use crate::episodes::upsert_episode;
use crate::finalize::finalize;
use crate::metadata::{merge_metadata, MovieFields};
use crate::pipeline::Aggregation;
use crate::policy::MergePolicy;

/// Aggregation state for one pass over a sheet.
///
/// Movies live in an arena in first-seen order and are addressed by title
/// through `movie_index`; banners are kept the same way by URL. Nothing here
/// outlives a single [`aggregate`](crate::aggregate) call.
pub struct CatalogBuilder<'a> {
    columns: &'a ColumnConfig,
    policy: &'a MergePolicy,
    movies: Vec<Movie>,
    movie_index: HashMap<String, usize>,
    banners: BannerRegistry,
    skipped: Vec<SkippedRow>,
    rows_seen: usize,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(columns: &'a ColumnConfig, policy: &'a MergePolicy) -> Self {
        Self {
            columns,
            policy,
            movies: Vec::new(),
            movie_index: HashMap::new(),
            banners: BannerRegistry::new(),
            skipped: Vec::new(),
            rows_seen: 0,
        }
    }

    /// Fold one row into the catalog. Rows that contribute nothing are
    /// recorded in the skip report.
    pub fn push_row(&mut self, row: &Row) {
        let index = self.rows_seen;
        self.rows_seen += 1;

        let data = match classify_row(row, self.columns, self.policy) {
            RowClass::Movie(data) => data,
            RowClass::BannerOnly { url } => {
                self.banners.upsert(&url, None);
                return;
            }
            RowClass::Skip(reason) => {
                let film = row.lookup_text(&self.columns.film_title);
                self.skip(index, film, reason);
                return;
            }
        };

        if let Some(url) = banner_url(row, self.columns) {
            if self.banners.upsert(&url, Some(&data.name)) == BannerUpdate::Attributed {
                trace!(banner = %url, movie = %data.name, "banner attributed");
            }
        }

        let candidate = Episode {
            episode_key: data.episode_key,
            embed_url: data.links.embed_url,
            video_url: data.links.video_url,
            upload_date: row.lookup_text(&self.columns.upload_date),
            shopee_link: row.lookup_text(&self.columns.shopee_link),
        };
        let policy = self.policy;
        let fields = MovieFields::from_row(row, self.columns);
        let movie = self.upsert_metadata(&data.name, &fields);
        let outcome = upsert_episode(movie, candidate, policy);
        trace!(row = index, movie = %data.name, episode = %data.episode_key, outcome = ?outcome, "episode upserted");
    }

    /// Find or create the movie titled `name` and fold `fields` into it.
    pub fn upsert_metadata(&mut self, name: &str, fields: &MovieFields) -> &mut Movie {
        let idx = match self.movie_index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.movies.len();
                self.movies.push(Movie::new(name));
                self.movie_index.insert(name.to_string(), idx);
                idx
            }
        };
        let movie = &mut self.movies[idx];
        merge_metadata(movie, fields);
        movie
    }

    fn skip(&mut self, row: usize, film: Option<String>, reason: SkipReason) {
        debug!(row, film = film.as_deref().unwrap_or(""), reason = %reason, "row skipped");
        self.skipped.push(SkippedRow { row, film, reason });
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn finish(self, updated: impl Into<String>) -> Aggregation {
        let catalog = finalize(self.movies, self.banners.into_banners(), updated.into(), self.policy);
        Aggregation {
            catalog,
            skipped: self.skipped,
        }
    }
}
