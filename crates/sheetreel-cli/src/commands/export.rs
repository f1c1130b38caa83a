use std::path::{Path, PathBuf};

use catalog_config::{Config, PathManager, SourceKind};
use catalog_core::{aggregate, MergePolicy};
use catalog_models::SkippedRow;
use catalog_sources::{CatalogWriter, ExportSummary, SkipReportWriter, SourceFactory};
use chrono::{Local, SecondsFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use tracing::info;

use crate::commands::config::load_config;
use crate::output::{Output, OutputFormat};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct ExportOverrides {
    pub input: Option<PathBuf>,
    pub url: Option<String>,
    pub out: Option<PathBuf>,
    pub skip_report: bool,
}

impl ExportOverrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.source.kind = SourceFactory::kind_for_path(&input);
            config.source.path = Some(input);
        }
        if let Some(url) = self.url {
            config.source.kind = SourceKind::CsvUrl;
            config.source.url = Some(url);
        }
        if let Some(out) = self.out {
            config.output.path = Some(out);
        }
        if self.skip_report {
            config.output.write_skip_report = true;
        }
    }
}

/// What one export produced.
#[derive(Debug)]
pub struct ExportReport {
    pub summary: ExportSummary,
    pub catalog_path: PathBuf,
    pub skip_report_path: Option<PathBuf>,
    pub skipped: Vec<SkippedRow>,
}

/// Generation marker stamped into every catalog.
fn generation_marker() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Fetch, aggregate and write once.
pub async fn export_once(config: &Config, paths: &PathManager) -> Result<ExportReport> {
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let source = SourceFactory::from_config(&config.source)?;
    info!(operation = "export_start", source = source.source_name(), "Fetching sheet rows");
    let rows = source.fetch_rows().await?;

    let policy = MergePolicy::from_config(&config.policy);
    let updated = generation_marker();
    let result = aggregate(&rows, &config.columns, &policy, &updated);

    let catalog_path = config.output.path.clone().unwrap_or_else(|| paths.catalog_file());
    CatalogWriter::new(&catalog_path).write(&result.catalog)?;

    let skip_report_path = if config.output.write_skip_report {
        let writer = SkipReportWriter::beside(&catalog_path);
        writer.write(&result.skipped)?;
        Some(writer.path().to_path_buf())
    } else {
        None
    };

    let summary = ExportSummary::new(&result.catalog, &result.skipped);
    info!(
        operation = "export_complete",
        movies = summary.movies,
        episodes = summary.episodes,
        banners = summary.banners,
        skipped = summary.skipped,
        path = %catalog_path.display(),
        "Export completed"
    );

    Ok(ExportReport {
        summary,
        catalog_path,
        skip_report_path,
        skipped: result.skipped,
    })
}

pub async fn run_export(
    config_path: Option<&Path>,
    paths: &PathManager,
    overrides: ExportOverrides,
    verbose: u8,
    output: &Output,
) -> Result<()> {
    let mut config = load_config(config_path, paths)?;
    overrides.apply(&mut config);

    let report = export_once(&config, paths).await?;
    print_report(&report, verbose, output);
    Ok(())
}

fn print_report(report: &ExportReport, verbose: u8, output: &Output) {
    let summary = &report.summary;
    match output.format() {
        OutputFormat::Human => {
            output.success(format!(
                "Exported {} movies ({} episodes), {} banners to {}",
                summary.movies,
                summary.episodes,
                summary.banners,
                report.catalog_path.display()
            ));
            if summary.skipped > 0 {
                output.warn(format!("{} rows skipped", summary.skipped));
            }
            if verbose > 0 {
                for skip in &report.skipped {
                    let film = skip.film.as_deref().unwrap_or("-");
                    output.info(format!("  row {} ({}): {}", skip.row, film, skip.reason));
                }
            }
            if let Some(path) = &report.skip_report_path {
                output.info(format!("Skip report written to {}", path.display()));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "export",
                "summary": summary,
                "catalog": report.catalog_path,
                "skipReport": report.skip_report_path,
                "skipped": report.skipped,
            }));
        }
    }
}
