use catalog_config::ColumnConfig;
use catalog_models::{EpisodeKey, Row, SkipReason};
use crate::episode_number::parse_episode_key;
use crate::links::{normalize_links, Links};
use crate::policy::MergePolicy;

/// The parts of a movie row every later stage needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRowData {
    pub name: String,
    pub episode_key: EpisodeKey,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    Movie(MovieRowData),
    BannerOnly { url: String },
    Skip(SkipReason),
}

/// Banner URL of a row, if the banner cell holds an `http` link.
pub fn banner_url(row: &Row, columns: &ColumnConfig) -> Option<String> {
    row.lookup_text(&columns.banner)
        .filter(|url| url.starts_with("http"))
}

pub fn classify_row(row: &Row, columns: &ColumnConfig, policy: &MergePolicy) -> RowClass {
    let Some(name) = row.lookup_text(&columns.film_title) else {
        return match banner_url(row, columns) {
            Some(url) => RowClass::BannerOnly { url },
            None => RowClass::Skip(SkipReason::NoTitleOrBanner),
        };
    };

    let Some(episode_cell) = row.lookup(&columns.episode) else {
        return RowClass::Skip(SkipReason::MissingEpisode);
    };
    let Some(episode_key) = parse_episode_key(episode_cell, policy) else {
        return RowClass::Skip(SkipReason::UnreadableEpisode {
            raw: episode_cell.as_text().unwrap_or_default(),
        });
    };

    let links = normalize_links(
        row.lookup_text(&columns.embed_url),
        row.lookup_text(&columns.video_url),
        policy,
    );
    if links.is_empty() {
        return RowClass::Skip(SkipReason::NoLinks);
    }

    RowClass::Movie(MovieRowData {
        name,
        episode_key,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(row: &Row) -> RowClass {
        classify_row(row, &ColumnConfig::default(), &MergePolicy::default())
    }

    #[test]
    fn test_banner_only_row() {
        let row = Row::new().with("Tên Bộ Phim", "  ").with("Banner", " https://cdn/b1.jpg ");
        assert_eq!(classify(&row), RowClass::BannerOnly { url: "https://cdn/b1.jpg".to_string() });

        let row = Row::new().with("Tên Bộ Phim", "").with("Banner", "b1.jpg");
        assert_eq!(classify(&row), RowClass::Skip(SkipReason::NoTitleOrBanner));
    }

    #[test]
    fn test_movie_row_skips() {
        let base = Row::new().with("Tên Bộ Phim", "Phim A");
        assert_eq!(classify(&base), RowClass::Skip(SkipReason::MissingEpisode));

        let row = base.clone().with("Số Tập", "Tập cuối").with("Embed URL", "https://e");
        assert_eq!(
            classify(&row),
            RowClass::Skip(SkipReason::UnreadableEpisode { raw: "Tập cuối".to_string() })
        );

        let row = base.clone().with("Số Tập", 3i64).with("Embed URL", " ");
        assert_eq!(classify(&row), RowClass::Skip(SkipReason::NoLinks));
    }

    #[test]
    fn test_movie_row() {
        let row = Row::new()
            .with("Tên Bộ Phim", " Phim A ")
            .with("Số Tập", "Tập 2")
            .with("Link Dailymotion", "https://www.facebook.com/v/9");
        match classify(&row) {
            RowClass::Movie(data) => {
                assert_eq!(data.name, "Phim A");
                assert_eq!(data.episode_key, EpisodeKey::Number(2));
                assert_eq!(data.links.embed_url, None);
                assert_eq!(data.links.video_url.as_deref(), Some("https://www.facebook.com/v/9"));
            }
            other => panic!("expected movie row, got {:?}", other),
        }
    }
}
