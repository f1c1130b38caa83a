use catalog_models::{Banner, Catalog, Episode, Movie};
use crate::policy::{EpisodeRule, MergePolicy};

/// Stable ascending sort; the full-length release goes last.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by_key(|e| e.episode_key);
}

/// Carry the nearest preceding Shopee link forward over episodes without one.
///
/// Expects episodes in sorted order. Shopee-suppressed keys are cleared and
/// also drop whatever link was being carried.
pub fn inherit_shopee_links(episodes: &mut [Episode], policy: &MergePolicy) {
    let mut carried: Option<String> = None;
    for episode in episodes.iter_mut() {
        if policy.has_rule(episode.episode_key, EpisodeRule::NoShopeeLink) {
            episode.shopee_link = None;
            carried = None;
            continue;
        }
        match episode.shopee_link {
            Some(ref link) => carried = Some(link.clone()),
            None => episode.shopee_link = carried.clone(),
        }
    }
}

/// Ranked movies first by ascending rank, unranked after, input order otherwise.
pub fn rank_movies(movies: &mut [Movie]) {
    movies.sort_by_key(|m| (m.rank.is_none(), m.rank));
}

pub fn finalize(mut movies: Vec<Movie>, banners: Vec<Banner>, updated: String, policy: &MergePolicy) -> Catalog {
    for movie in movies.iter_mut() {
        sort_episodes(&mut movie.episodes);
        inherit_shopee_links(&mut movie.episodes, policy);
    }
    rank_movies(&mut movies);

    Catalog {
        movies,
        banners,
        updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::EpisodeKey;

    fn ep(key: EpisodeKey, shopee: Option<&str>) -> Episode {
        Episode {
            shopee_link: shopee.map(String::from),
            ..Episode::new(key)
        }
    }

    fn shopee(episodes: &[Episode]) -> Vec<Option<&str>> {
        episodes.iter().map(|e| e.shopee_link.as_deref()).collect()
    }

    #[test]
    fn test_sort_puts_full_length_last() {
        let mut episodes = vec![
            ep(EpisodeKey::FullLength, None),
            ep(EpisodeKey::Number(12), None),
            ep(EpisodeKey::Number(2), None),
        ];
        sort_episodes(&mut episodes);
        let keys: Vec<EpisodeKey> = episodes.iter().map(|e| e.episode_key).collect();
        assert_eq!(keys, vec![EpisodeKey::Number(2), EpisodeKey::Number(12), EpisodeKey::FullLength]);
    }

    #[test]
    fn test_shopee_inheritance_chain() {
        let mut episodes = vec![
            ep(EpisodeKey::Number(1), None),
            ep(EpisodeKey::Number(2), Some("A")),
            ep(EpisodeKey::Number(3), None),
            ep(EpisodeKey::Number(4), Some("B")),
            ep(EpisodeKey::Number(5), None),
        ];
        inherit_shopee_links(&mut episodes, &MergePolicy::default());
        assert_eq!(shopee(&episodes), vec![None, Some("A"), Some("A"), Some("B"), Some("B")]);
    }

    #[test]
    fn test_first_episode_never_inherits_or_passes_on() {
        let mut episodes = vec![
            ep(EpisodeKey::Number(1), Some("X")),
            ep(EpisodeKey::Number(2), None),
            ep(EpisodeKey::FullLength, None),
        ];
        inherit_shopee_links(&mut episodes, &MergePolicy::default());
        assert_eq!(shopee(&episodes), vec![None, None, None]);
    }

    #[test]
    fn test_rank_order_is_stable() {
        let mut a = Movie::new("A");
        a.rank = Some(2);
        let b = Movie::new("B");
        let mut c = Movie::new("C");
        c.rank = Some(1);
        let d = Movie::new("D");
        let mut e = Movie::new("E");
        e.rank = Some(2);

        let mut movies = vec![a, b, c, d, e];
        rank_movies(&mut movies);
        let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "E", "B", "D"]);
    }
}
