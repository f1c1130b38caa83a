use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub scheduler: Option<SchedulerConfig>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Csv,
    Json,
    CsvUrl,
}

/// Where rows come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    /// Turn numeric-looking CSV cells into numbers, like a spreadsheet export does
    #[serde(default = "default_true")]
    pub infer_numbers: bool,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: None,
            url: None,
            infer_numbers: default_true(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Catalog file; defaults to `movies.json` in the data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub write_skip_report: bool,
}

/// Header aliases for each logical column, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_film_title")]
    pub film_title: Vec<String>,
    #[serde(default = "default_episode")]
    pub episode: Vec<String>,
    #[serde(default = "default_embed_url")]
    pub embed_url: Vec<String>,
    #[serde(default = "default_video_url")]
    pub video_url: Vec<String>,
    #[serde(default = "default_upload_date")]
    pub upload_date: Vec<String>,
    #[serde(default = "default_viet_name")]
    pub viet_name: Vec<String>,
    #[serde(default = "default_summary")]
    pub summary: Vec<String>,
    #[serde(default = "default_rank")]
    pub rank: Vec<String>,
    /// Any column whose label contains this text is a poster column
    #[serde(default = "default_poster_label")]
    pub poster_label: String,
    #[serde(default = "default_year")]
    pub year: Vec<String>,
    #[serde(default = "default_genre")]
    pub genre: Vec<String>,
    #[serde(default = "default_country")]
    pub country: Vec<String>,
    #[serde(default = "default_allow_pc")]
    pub allow_pc: Vec<String>,
    #[serde(default = "default_banner")]
    pub banner: Vec<String>,
    #[serde(default = "default_shopee_link")]
    pub shopee_link: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            film_title: default_film_title(),
            episode: default_episode(),
            embed_url: default_embed_url(),
            video_url: default_video_url(),
            upload_date: default_upload_date(),
            viet_name: default_viet_name(),
            summary: default_summary(),
            rank: default_rank(),
            poster_label: default_poster_label(),
            year: default_year(),
            genre: default_genre(),
            country: default_country(),
            allow_pc: default_allow_pc(),
            banner: default_banner(),
            shopee_link: default_shopee_link(),
        }
    }
}

impl ColumnConfig {
    fn alias_lists(&self) -> [(&'static str, &Vec<String>); 14] {
        [
            ("film_title", &self.film_title),
            ("episode", &self.episode),
            ("embed_url", &self.embed_url),
            ("video_url", &self.video_url),
            ("upload_date", &self.upload_date),
            ("viet_name", &self.viet_name),
            ("summary", &self.summary),
            ("rank", &self.rank),
            ("year", &self.year),
            ("genre", &self.genre),
            ("country", &self.country),
            ("allow_pc", &self.allow_pc),
            ("banner", &self.banner),
            ("shopee_link", &self.shopee_link),
        ]
    }
}

/// Editable parts of the merge policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Episode cell spellings meaning "the whole film", compared case-folded
    #[serde(default = "default_full_length_spellings")]
    pub full_length_spellings: Vec<String>,
    /// Hostname fragments of platforms that cannot be embedded
    #[serde(default = "default_foreign_hosts")]
    pub foreign_hosts: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            full_length_spellings: default_full_length_spellings(),
            foreign_hosts: default_foreign_hosts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cron expression with a seconds field (6 or 7 fields)
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_schedule() -> String {
    "0 */10 * * * *".to_string()  // Every 10 minutes
}

pub fn default_scheduler_config() -> SchedulerConfig {
    SchedulerConfig {
        schedule: default_schedule(),
        run_on_startup: default_true(),
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_film_title() -> Vec<String> {
    labels(&["Tên Bộ Phim"])
}

fn default_episode() -> Vec<String> {
    labels(&["Số Tập"])
}

fn default_embed_url() -> Vec<String> {
    labels(&["Embed URL"])
}

fn default_video_url() -> Vec<String> {
    // Some sheets lost the trailing "n" in the header
    labels(&["Link Dailymotion", "Link Dailymotio", "Video URL"])
}

fn default_upload_date() -> Vec<String> {
    labels(&["Ngày Upload"])
}

fn default_viet_name() -> Vec<String> {
    labels(&["Tên Phim Việt"])
}

fn default_summary() -> Vec<String> {
    labels(&["Tóm tắt phim"])
}

fn default_rank() -> Vec<String> {
    labels(&["TOP"])
}

fn default_poster_label() -> String {
    "Poster".to_string()
}

fn default_year() -> Vec<String> {
    labels(&["Năm"])
}

fn default_genre() -> Vec<String> {
    labels(&["Thể loại"])
}

fn default_country() -> Vec<String> {
    labels(&["Quốc gia"])
}

fn default_allow_pc() -> Vec<String> {
    labels(&["Xem PC"])
}

fn default_banner() -> Vec<String> {
    labels(&["Banner"])
}

fn default_shopee_link() -> Vec<String> {
    labels(&["Shopee Link"])
}

fn default_full_length_spellings() -> Vec<String> {
    labels(&["full", "full movie", "trọn bộ", "tron bo"])
}

fn default_foreign_hosts() -> Vec<String> {
    labels(&["facebook.com", "fb.watch", "fb.com"])
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.source.kind {
            SourceKind::Csv | SourceKind::Json => {
                if self.source.path.is_none() {
                    return Err(anyhow::anyhow!("source.path is required for {:?} sources", self.source.kind));
                }
            }
            SourceKind::CsvUrl => {
                let url = self.source.url.as_deref().unwrap_or("");
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(anyhow::anyhow!("source.url must be an http(s) URL for csv_url sources"));
                }
            }
        }

        if self.source.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("source.timeout_seconds must be positive"));
        }

        for (name, aliases) in self.columns.alias_lists() {
            if aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(anyhow::anyhow!("columns.{} needs at least one header label", name));
            }
        }
        if self.columns.poster_label.trim().is_empty() {
            return Err(anyhow::anyhow!("columns.poster_label cannot be empty"));
        }

        if let Some(ref scheduler) = self.scheduler {
            let fields = scheduler.schedule.split_whitespace().count();
            if !(6..=7).contains(&fields) {
                return Err(anyhow::anyhow!(
                    "scheduler.schedule must have 6 or 7 fields (seconds first), got {}: {:?}",
                    fields,
                    scheduler.schedule
                ));
            }
        }

        Ok(())
    }
}
