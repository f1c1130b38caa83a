use serde::{Deserialize, Serialize};

/// Promotional banner. `movie_id` is a weak reference to a [`crate::Movie`] name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub url: String,
    pub movie_id: Option<String>,
}
