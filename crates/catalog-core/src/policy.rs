//! The enumerable special cases the merge engine consults.
//!
//! Spellings and host lists come from configuration. Per-episode rules are a
//! fixed table: adding an exception means adding a row to [`EPISODE_RULES`].

use catalog_config::PolicyConfig;
use catalog_models::EpisodeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeRule {
    /// Never carries a Shopee link; Shopee inheritance restarts here.
    NoShopeeLink,
    /// A direct video link outranks completeness when duplicates collide.
    VideoLinkPriority,
}

pub const EPISODE_RULES: &[(EpisodeKey, EpisodeRule)] = &[
    (EpisodeKey::FIRST, EpisodeRule::NoShopeeLink),
    (EpisodeKey::FIRST, EpisodeRule::VideoLinkPriority),
];

#[derive(Debug, Clone)]
pub struct MergePolicy {
    full_length_spellings: Vec<String>,
    foreign_hosts: Vec<String>,
}

impl MergePolicy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            full_length_spellings: config
                .full_length_spellings
                .iter()
                .map(|s| fold(s))
                .filter(|s| !s.is_empty())
                .collect(),
            foreign_hosts: config
                .foreign_hosts
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// `text` must already be folded with [`fold`].
    pub fn is_full_length(&self, text: &str) -> bool {
        self.full_length_spellings.iter().any(|s| s == text)
    }

    /// `host` must be lowercase.
    pub fn is_foreign_host(&self, host: &str) -> bool {
        self.foreign_hosts.iter().any(|h| host.contains(h.as_str()))
    }

    pub fn has_rule(&self, key: EpisodeKey, rule: EpisodeRule) -> bool {
        EPISODE_RULES.iter().any(|(k, r)| *k == key && *r == rule)
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

/// Trim, collapse inner whitespace and lowercase.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_episode_rules() {
        let policy = MergePolicy::default();
        assert!(policy.has_rule(EpisodeKey::Number(1), EpisodeRule::NoShopeeLink));
        assert!(policy.has_rule(EpisodeKey::Number(1), EpisodeRule::VideoLinkPriority));
        assert!(!policy.has_rule(EpisodeKey::Number(2), EpisodeRule::NoShopeeLink));
        assert!(!policy.has_rule(EpisodeKey::FullLength, EpisodeRule::VideoLinkPriority));
    }

    #[test]
    fn test_config_values_are_folded() {
        let policy = MergePolicy::from_config(&PolicyConfig {
            full_length_spellings: vec!["  Full   Movie ".to_string(), "".to_string()],
            foreign_hosts: vec![" FB.Watch ".to_string()],
        });
        assert!(policy.is_full_length("full movie"));
        assert!(!policy.is_full_length(""));
        assert!(policy.is_foreign_host("fb.watch"));
        assert!(!policy.is_foreign_host("dailymotion.com"));
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("  TRỌN   Bộ "), "trọn bộ");
    }
}
