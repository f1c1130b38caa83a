use std::path::{Path, PathBuf};

use catalog_models::{Catalog, SkippedRow};
use serde::Serialize;
use tracing::{debug, info};

use crate::SourceError;

/// Counts reported after an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub movies: usize,
    pub episodes: usize,
    pub banners: usize,
    pub skipped: usize,
}

impl ExportSummary {
    pub fn new(catalog: &Catalog, skipped: &[SkippedRow]) -> Self {
        Self {
            movies: catalog.movies.len(),
            episodes: catalog.episode_count(),
            banners: catalog.banners.len(),
            skipped: skipped.len(),
        }
    }
}

/// Writes the catalog JSON consumed by the site.
pub struct CatalogWriter {
    path: PathBuf,
}

impl CatalogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, catalog: &Catalog) -> Result<(), SourceError> {
        let json = serde_json::to_vec_pretty(catalog)?;
        write_atomic(&self.path, &json)?;
        info!(
            path = %self.path.display(),
            movies = catalog.movies.len(),
            banners = catalog.banners.len(),
            "Catalog written"
        );
        Ok(())
    }
}

/// Skip report file that sits next to a catalog: `movies.json` gets
/// `movies.skipped.json`.
pub fn skip_report_path(catalog_path: &Path) -> PathBuf {
    let stem = catalog_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("catalog");
    catalog_path.with_file_name(format!("{}.skipped.json", stem))
}

pub struct SkipReportWriter {
    path: PathBuf,
}

impl SkipReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn beside(catalog_path: &Path) -> Self {
        Self::new(skip_report_path(catalog_path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, skipped: &[SkippedRow]) -> Result<(), SourceError> {
        let json = serde_json::to_vec_pretty(skipped)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), skipped = skipped.len(), "Skip report written");
        Ok(())
    }
}

/// Write through a temporary file in the target directory, then rename, so
/// readers never see a half-written file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
    }
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, bytes).map_err(|e| SourceError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(SourceError::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_models::{Banner, Episode, EpisodeKey, Movie, SkipReason};
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        let mut movie = Movie::new("Phim Việt");
        movie.episodes.push(Episode::new(EpisodeKey::FullLength));
        Catalog {
            movies: vec![movie],
            banners: vec![Banner {
                url: "https://b/1".to_string(),
                movie_id: None,
            }],
            updated: "2024-05-01T08:00:00+07:00".to_string(),
        }
    }

    #[test]
    fn test_writer_creates_directories_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/movies.json");
        CatalogWriter::new(&path).write(&catalog()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Phim Việt"));
        let back: Catalog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, catalog());
        assert!(!dir.path().join("nested/data/movies.json.tmp").exists());
    }

    #[test]
    fn test_writer_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, "stale").unwrap();
        CatalogWriter::new(&path).write(&catalog()).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "stale");
    }

    #[test]
    fn test_skip_report() {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("movies.json");
        let writer = SkipReportWriter::beside(&catalog_path);
        assert_eq!(writer.path(), dir.path().join("movies.skipped.json"));

        let skipped = vec![SkippedRow {
            row: 4,
            film: Some("A".to_string()),
            reason: SkipReason::NoLinks,
        }];
        writer.write(&skipped).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(writer.path()).unwrap()).unwrap();
        assert_eq!(json[0]["row"], 4);
        assert_eq!(json[0]["reason"]["kind"], "no_links");
    }

    #[test]
    fn test_summary_counts() {
        let summary = ExportSummary::new(&catalog(), &[]);
        assert_eq!(
            summary,
            ExportSummary {
                movies: 1,
                episodes: 1,
                banners: 1,
                skipped: 0
            }
        );
    }
}
