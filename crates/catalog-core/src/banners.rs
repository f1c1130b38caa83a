use catalog_models::Banner;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerUpdate {
    Added,
    Attributed,
    Unchanged,
}

/// Banners in first-seen order, deduplicated by URL.
#[derive(Debug, Default)]
pub struct BannerRegistry {
    banners: Vec<Banner>,
    index: HashMap<String, usize>,
}

impl BannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a banner sighting. The first non-null movie attribution sticks.
    pub fn upsert(&mut self, url: &str, movie: Option<&str>) -> BannerUpdate {
        match self.index.get(url) {
            None => {
                self.index.insert(url.to_string(), self.banners.len());
                self.banners.push(Banner {
                    url: url.to_string(),
                    movie_id: movie.map(String::from),
                });
                BannerUpdate::Added
            }
            Some(&idx) => {
                let banner = &mut self.banners[idx];
                match (banner.movie_id.is_none(), movie) {
                    (true, Some(name)) => {
                        banner.movie_id = Some(name.to_string());
                        BannerUpdate::Attributed
                    }
                    _ => BannerUpdate::Unchanged,
                }
            }
        }
    }

    pub fn get(&self, url: &str) -> Option<&Banner> {
        self.index.get(url).map(|&idx| &self.banners[idx])
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    pub fn into_banners(self) -> Vec<Banner> {
        self.banners
    }
}
