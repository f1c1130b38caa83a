use serde::{Deserialize, Serialize};
use crate::episode::Episode;

/// A film with its episodes, keyed by the raw title cell in `name`.
///
/// Text attributes use an empty string for "not provided", matching what the
/// downstream renderer already expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub name: String,
    pub viet_name: String,
    pub summary: String,
    pub rank: Option<u32>,
    pub poster: String,
    pub year: String,
    pub genre: String,
    pub country: String,
    #[serde(rename = "allowPC")]
    pub allow_pc: bool,
    pub episodes: Vec<Episode>,
}

impl Movie {
    /// Empty record for `name`; the display title falls back to the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            viet_name: name.clone(),
            name,
            summary: String::new(),
            rank: None,
            poster: String::new(),
            year: String::new(),
            genre: String::new(),
            country: String::new(),
            allow_pc: false,
            episodes: Vec::new(),
        }
    }
}
