use catalog_models::{Episode, Movie};
use crate::policy::{EpisodeRule, MergePolicy};
use tracing::trace;

/// What happened to an incoming episode candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeMerge {
    Inserted,
    /// Strictly more complete candidate took the existing slot.
    Replaced,
    /// Candidate brought a video link the existing entry lacked.
    VideoPriorityReplaced,
    /// Existing entry kept its video link; only an empty embed slot was patched.
    VideoPriorityKept,
    /// Existing entry kept; empty slots filled from the candidate.
    FilledGaps,
}

/// Merge an episode candidate into a movie, keeping one episode per key.
///
/// Completeness decides between duplicates: a strictly more complete
/// candidate replaces the stored episode in place, otherwise the stored one
/// stays and only its empty fields are filled. Keys marked
/// [`EpisodeRule::VideoLinkPriority`] let a video link decide first.
pub fn upsert_episode(movie: &mut Movie, mut candidate: Episode, policy: &MergePolicy) -> EpisodeMerge {
    let key = candidate.episode_key;
    if policy.has_rule(key, EpisodeRule::NoShopeeLink) {
        candidate.shopee_link = None;
    }

    let Some(idx) = movie.episodes.iter().position(|e| e.episode_key == key) else {
        movie.episodes.push(candidate);
        return EpisodeMerge::Inserted;
    };
    let existing = &mut movie.episodes[idx];

    let outcome = resolve(existing, candidate, policy);
    trace!(movie = %movie.name, episode = %key, outcome = ?outcome, "merged duplicate episode");
    outcome
}

fn resolve(existing: &mut Episode, candidate: Episode, policy: &MergePolicy) -> EpisodeMerge {
    if policy.has_rule(existing.episode_key, EpisodeRule::VideoLinkPriority) {
        match (existing.video_url.is_some(), candidate.video_url.is_some()) {
            (false, true) => {
                let previous = std::mem::replace(existing, candidate);
                existing.fill_empty_from(&previous);
                return EpisodeMerge::VideoPriorityReplaced;
            }
            (true, false) => {
                if existing.embed_url.is_none() {
                    existing.embed_url = candidate.embed_url;
                }
                return EpisodeMerge::VideoPriorityKept;
            }
            _ => {}
        }
    }

    if candidate.completeness() > existing.completeness() {
        *existing = candidate;
        EpisodeMerge::Replaced
    } else {
        existing.fill_empty_from(&candidate);
        EpisodeMerge::FilledGaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::EpisodeKey;

    fn ep(key: u32, embed: Option<&str>, video: Option<&str>, date: Option<&str>, shopee: Option<&str>) -> Episode {
        Episode {
            episode_key: EpisodeKey::Number(key),
            embed_url: embed.map(String::from),
            video_url: video.map(String::from),
            upload_date: date.map(String::from),
            shopee_link: shopee.map(String::from),
        }
    }

    #[test]
    fn test_insert_suppresses_first_episode_shopee() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        assert_eq!(upsert_episode(&mut movie, ep(1, Some("e"), None, None, Some("s")), &policy), EpisodeMerge::Inserted);
        upsert_episode(&mut movie, ep(2, Some("e"), None, None, Some("s")), &policy);
        assert_eq!(movie.episodes[0].shopee_link, None);
        assert_eq!(movie.episodes[1].shopee_link.as_deref(), Some("s"));
    }

    #[test]
    fn test_more_complete_candidate_replaces_in_place() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(3, Some("x"), None, None, Some("old-shop")), &policy);
        upsert_episode(&mut movie, ep(4, Some("y"), None, None, None), &policy);
        let outcome = upsert_episode(&mut movie, ep(3, Some("x"), Some("y"), Some("2024-01-01"), None), &policy);
        assert_eq!(outcome, EpisodeMerge::Replaced);
        assert_eq!(movie.episodes.len(), 2);
        assert_eq!(movie.episodes[0], ep(3, Some("x"), Some("y"), Some("2024-01-01"), None));
    }

    #[test]
    fn test_equal_completeness_fills_gaps() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(2, Some("e1"), None, None, None), &policy);
        let outcome = upsert_episode(&mut movie, ep(2, None, Some("v2"), None, Some("s2")), &policy);
        assert_eq!(outcome, EpisodeMerge::FilledGaps);
        assert_eq!(movie.episodes[0], ep(2, Some("e1"), Some("v2"), None, Some("s2")));
    }

    #[test]
    fn test_less_complete_candidate_only_patches() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(5, Some("e"), Some("v"), None, None), &policy);
        let outcome = upsert_episode(&mut movie, ep(5, Some("other"), None, None, Some("s")), &policy);
        assert_eq!(outcome, EpisodeMerge::FilledGaps);
        assert_eq!(movie.episodes[0], ep(5, Some("e"), Some("v"), None, Some("s")));
    }

    #[test]
    fn test_first_episode_video_priority() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(1, Some("e1"), None, None, None), &policy);
        let outcome = upsert_episode(&mut movie, ep(1, None, Some("v1"), None, None), &policy);
        assert_eq!(outcome, EpisodeMerge::VideoPriorityReplaced);
        assert_eq!(movie.episodes, vec![ep(1, Some("e1"), Some("v1"), None, None)]);
    }

    #[test]
    fn test_first_episode_video_beats_completeness() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(1, Some("e1"), None, Some("2024-01-01"), None), &policy);
        upsert_episode(&mut movie, ep(1, None, Some("v1"), None, None), &policy);
        assert_eq!(movie.episodes[0], ep(1, Some("e1"), Some("v1"), Some("2024-01-01"), None));
    }

    #[test]
    fn test_first_episode_keeps_existing_video() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(1, None, Some("v1"), None, None), &policy);
        // more complete on paper, but it has no video link
        let outcome = upsert_episode(&mut movie, ep(1, Some("e1"), None, Some("2024-02-02"), None), &policy);
        assert_eq!(outcome, EpisodeMerge::VideoPriorityKept);
        assert_eq!(movie.episodes[0], ep(1, Some("e1"), Some("v1"), None, None));
    }

    #[test]
    fn test_first_episode_falls_back_to_completeness() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(1, None, Some("v1"), None, None), &policy);
        let outcome = upsert_episode(&mut movie, ep(1, Some("e"), Some("v2"), None, None), &policy);
        assert_eq!(outcome, EpisodeMerge::Replaced);
        assert_eq!(movie.episodes[0], ep(1, Some("e"), Some("v2"), None, None));
    }

    #[test]
    fn test_video_priority_does_not_apply_to_other_episodes() {
        let policy = MergePolicy::default();
        let mut movie = Movie::new("A");
        upsert_episode(&mut movie, ep(2, Some("e2"), None, Some("d"), None), &policy);
        let outcome = upsert_episode(&mut movie, ep(2, None, Some("v2"), None, None), &policy);
        assert_eq!(outcome, EpisodeMerge::FilledGaps);
        assert_eq!(movie.episodes[0], ep(2, Some("e2"), Some("v2"), Some("d"), None));
    }
}
