use serde::{Deserialize, Serialize};
use crate::banner::Banner;
use crate::movie::Movie;

/// Final output of an aggregation run.
///
/// `updated` is an opaque generation marker chosen by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Catalog {
    pub movies: Vec<Movie>,
    pub banners: Vec<Banner>,
    pub updated: String,
}

impl Catalog {
    pub fn episode_count(&self) -> usize {
        self.movies.iter().map(|m| m.episodes.len()).sum()
    }
}
