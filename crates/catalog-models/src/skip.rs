use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a row did not contribute to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No film title and no usable banner URL.
    NoTitleOrBanner,
    MissingEpisode,
    UnreadableEpisode { raw: String },
    NoLinks,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTitleOrBanner => f.write_str("no film title and no banner URL"),
            SkipReason::MissingEpisode => f.write_str("episode cell is empty"),
            SkipReason::UnreadableEpisode { raw } => write!(f, "episode number unreadable: {:?}", raw),
            SkipReason::NoLinks => f.write_str("neither embed nor video link"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position of the row in the input sequence.
    pub row: usize,
    pub film: Option<String>,
    pub reason: SkipReason,
}
