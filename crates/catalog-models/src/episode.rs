use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Episode identifier within a movie.
///
/// Ordering puts every numbered episode before the full-length release,
/// which is how the finalized episode list is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EpisodeKey {
    Number(u32),
    FullLength,
}

impl EpisodeKey {
    pub const FIRST: EpisodeKey = EpisodeKey::Number(1);
    pub const FULL_LENGTH_LABEL: &'static str = "FULL";
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeKey::Number(n) => write!(f, "{}", n),
            EpisodeKey::FullLength => f.write_str(Self::FULL_LENGTH_LABEL),
        }
    }
}

impl Serialize for EpisodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EpisodeKey::Number(n) => serializer.serialize_u32(*n),
            EpisodeKey::FullLength => serializer.serialize_str(Self::FULL_LENGTH_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for EpisodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(EpisodeKey::Number(n)),
            Raw::Label(s) if s.eq_ignore_ascii_case(Self::FULL_LENGTH_LABEL) => Ok(EpisodeKey::FullLength),
            Raw::Label(s) => s
                .trim()
                .parse::<u32>()
                .map(EpisodeKey::Number)
                .map_err(|_| serde::de::Error::custom(format!("invalid episode key: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub episode_key: EpisodeKey,
    pub embed_url: Option<String>,
    pub video_url: Option<String>,
    pub upload_date: Option<String>,
    pub shopee_link: Option<String>,
}

impl Episode {
    pub fn new(episode_key: EpisodeKey) -> Self {
        Self {
            episode_key,
            embed_url: None,
            video_url: None,
            upload_date: None,
            shopee_link: None,
        }
    }

    /// Number of populated link/date fields. The Shopee link does not count.
    pub fn completeness(&self) -> usize {
        [&self.embed_url, &self.video_url, &self.upload_date]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    pub fn has_link(&self) -> bool {
        self.embed_url.is_some() || self.video_url.is_some()
    }

    /// Copy each of `other`'s values into slots that are still empty here.
    pub fn fill_empty_from(&mut self, other: &Episode) {
        fill(&mut self.embed_url, &other.embed_url);
        fill(&mut self.video_url, &other.video_url);
        fill(&mut self.upload_date, &other.upload_date);
        fill(&mut self.shopee_link, &other.shopee_link);
    }
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        if let Some(v) = value {
            *slot = Some(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_length_sorts_after_numbers() {
        let mut keys = vec![
            EpisodeKey::FullLength,
            EpisodeKey::Number(10),
            EpisodeKey::Number(2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![EpisodeKey::Number(2), EpisodeKey::Number(10), EpisodeKey::FullLength]
        );
    }

    #[test]
    fn test_key_serialization() {
        assert_eq!(serde_json::to_string(&EpisodeKey::Number(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&EpisodeKey::FullLength).unwrap(), "\"FULL\"");
        let key: EpisodeKey = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(key, EpisodeKey::FullLength);
        let key: EpisodeKey = serde_json::from_str("7").unwrap();
        assert_eq!(key, EpisodeKey::Number(7));
    }

    #[test]
    fn test_completeness_ignores_shopee() {
        let mut ep = Episode::new(EpisodeKey::Number(2));
        ep.shopee_link = Some("https://shopee".to_string());
        assert_eq!(ep.completeness(), 0);
        ep.embed_url = Some("e".to_string());
        ep.upload_date = Some("2024-01-01".to_string());
        assert_eq!(ep.completeness(), 2);
    }

    #[test]
    fn test_fill_empty_keeps_existing_values() {
        let mut ep = Episode::new(EpisodeKey::Number(2));
        ep.embed_url = Some("kept".to_string());
        let mut other = Episode::new(EpisodeKey::Number(2));
        other.embed_url = Some("ignored".to_string());
        other.video_url = Some("v".to_string());
        ep.fill_empty_from(&other);
        assert_eq!(ep.embed_url.as_deref(), Some("kept"));
        assert_eq!(ep.video_url.as_deref(), Some("v"));
    }

    #[test]
    fn test_episode_field_names() {
        let ep = Episode::new(EpisodeKey::Number(1));
        let json = serde_json::to_value(&ep).unwrap();
        for field in ["episodeKey", "embedUrl", "videoUrl", "uploadDate", "shopeeLink"] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
    }
}
