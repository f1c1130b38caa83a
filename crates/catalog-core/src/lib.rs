pub mod aggregator;
pub mod banners;
pub mod classify;
pub mod episode_number;
pub mod episodes;
pub mod finalize;
pub mod links;
pub mod metadata;
pub mod pipeline;
pub mod policy;

pub use aggregator::CatalogBuilder;
pub use banners::{BannerRegistry, BannerUpdate};
pub use classify::{classify_row, MovieRowData, RowClass};
pub use episode_number::parse_episode_key;
pub use episodes::{upsert_episode, EpisodeMerge};
pub use links::{normalize_links, Links};
pub use pipeline::{aggregate, Aggregation};
pub use policy::{EpisodeRule, MergePolicy, EPISODE_RULES};
