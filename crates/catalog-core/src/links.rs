use crate::policy::MergePolicy;
use tracing::trace;

/// Episode links after reclassification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub embed_url: Option<String>,
    pub video_url: Option<String>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.embed_url.is_none() && self.video_url.is_none()
    }
}

/// Lowercase hostname of a URL, tolerating a missing scheme.
pub fn host_of(url: &str) -> Option<String> {
    let rest = url.trim();
    let rest = match rest.find("://") {
        Some(i) => &rest[i + 3..],
        None => rest,
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = host_port.split(':').next().unwrap_or(host_port).to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

pub fn is_foreign_url(url: &str, policy: &MergePolicy) -> bool {
    host_of(url).is_some_and(|host| policy.is_foreign_host(&host))
}

/// Put each link in the slot it belongs to.
///
/// A foreign-platform URL never stays in the embed slot: in the embed cell it
/// moves to the video slot (unless the video cell already has a link), in the
/// video cell it stays put. A non-foreign embed link is always kept.
pub fn normalize_links(embed: Option<String>, video: Option<String>, policy: &MergePolicy) -> Links {
    let embed = embed.filter(|s| !s.trim().is_empty());
    let video = video.filter(|s| !s.trim().is_empty());

    let embed_is_foreign = embed.as_deref().is_some_and(|u| is_foreign_url(u, policy));
    let (embed_url, moved) = if embed_is_foreign {
        trace!(url = ?embed, "foreign link found in embed column");
        (None, embed)
    } else {
        (embed, None)
    };

    Links {
        embed_url,
        video_url: video.or(moved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://www.Facebook.com/watch?v=1").as_deref(), Some("www.facebook.com"));
        assert_eq!(host_of("fb.watch/abc").as_deref(), Some("fb.watch"));
        assert_eq!(host_of("https://user@geo.dailymotion.com:443/player").as_deref(), Some("geo.dailymotion.com"));
        assert_eq!(host_of("https:///path"), None);
    }

    #[test]
    fn test_foreign_video_with_empty_embed() {
        let policy = MergePolicy::default();
        let links = normalize_links(None, s("https://www.facebook.com/reel/1"), &policy);
        assert_eq!(links.embed_url, None);
        assert_eq!(links.video_url.as_deref(), Some("https://www.facebook.com/reel/1"));
    }

    #[test]
    fn test_same_foreign_url_in_both_columns() {
        let policy = MergePolicy::default();
        let url = "https://fb.watch/xyz";
        let links = normalize_links(s(url), s(url), &policy);
        assert_eq!(links.embed_url, None);
        assert_eq!(links.video_url.as_deref(), Some(url));
    }

    #[test]
    fn test_foreign_video_keeps_distinct_embed() {
        let policy = MergePolicy::default();
        let links = normalize_links(
            s("https://geo.dailymotion.com/player.html?video=x1"),
            s("https://facebook.com/v/1"),
            &policy,
        );
        assert_eq!(links.embed_url.as_deref(), Some("https://geo.dailymotion.com/player.html?video=x1"));
        assert_eq!(links.video_url.as_deref(), Some("https://facebook.com/v/1"));
    }

    #[test]
    fn test_foreign_embed_moves_to_video() {
        let policy = MergePolicy::default();
        let links = normalize_links(s("https://www.facebook.com/v/2"), None, &policy);
        assert_eq!(links.embed_url, None);
        assert_eq!(links.video_url.as_deref(), Some("https://www.facebook.com/v/2"));

        // an existing video link is not displaced
        let links = normalize_links(
            s("https://www.facebook.com/v/2"),
            s("https://www.dailymotion.com/video/x2"),
            &policy,
        );
        assert_eq!(links.embed_url, None);
        assert_eq!(links.video_url.as_deref(), Some("https://www.dailymotion.com/video/x2"));
    }

    #[test]
    fn test_plain_links_untouched() {
        let policy = MergePolicy::default();
        let links = normalize_links(s("https://e"), s("https://v"), &policy);
        assert_eq!(links, Links { embed_url: s("https://e"), video_url: s("https://v") });
        assert!(normalize_links(s("  "), None, &policy).is_empty());
    }
}
