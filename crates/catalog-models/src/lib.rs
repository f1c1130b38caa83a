pub mod banner;
pub mod catalog;
pub mod episode;
pub mod movie;
pub mod row;
pub mod skip;

pub use banner::Banner;
pub use catalog::Catalog;
pub use episode::{Episode, EpisodeKey};
pub use movie::Movie;
pub use row::{CellValue, Row};
pub use skip::{SkipReason, SkippedRow};
