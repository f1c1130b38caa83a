use std::sync::Arc;

use catalog_config::{default_scheduler_config, Config, PathManager, SchedulerConfig};
use color_eyre::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::commands::export::export_once;
use crate::output::Output;

/// Cron-driven exporter. Each run loads nothing new: the configuration is
/// fixed when the daemon starts.
pub struct Scheduler {
    scheduler: JobScheduler,
    config: Arc<Config>,
    paths: Arc<PathManager>,
    schedule: SchedulerConfig,
}

impl Scheduler {
    pub async fn new(config: Config, paths: PathManager, schedule: SchedulerConfig) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            scheduler,
            config: Arc::new(config),
            paths: Arc::new(paths),
            schedule,
        })
    }

    pub async fn start(&mut self) -> Result<()> {
        if self.schedule.run_on_startup {
            info!(operation = "scheduler_startup", "Running initial export on startup");
            run_scheduled_export(&self.config, &self.paths).await;
        }

        let config = Arc::clone(&self.config);
        let paths = Arc::clone(&self.paths);
        let job = Job::new_async(self.schedule.schedule.as_str(), move |_uuid, _scheduler| {
            let config = Arc::clone(&config);
            let paths = Arc::clone(&paths);
            Box::pin(async move {
                run_scheduled_export(&config, &paths).await;
            })
        })?;
        self.scheduler.add(job).await?;
        self.scheduler.start().await?;

        info!(
            operation = "scheduler_started",
            schedule = %self.schedule.schedule,
            "Scheduler started"
        );
        Ok(())
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        info!(operation = "scheduler_stopped", "Scheduler stopped");
        Ok(())
    }
}

/// One scheduled run. Failures are logged so the next tick still fires.
async fn run_scheduled_export(config: &Config, paths: &PathManager) {
    info!(operation = "scheduled_export_start", "Starting scheduled export");
    match export_once(config, paths).await {
        Ok(report) => {
            info!(
                operation = "scheduled_export_complete",
                movies = report.summary.movies,
                skipped = report.summary.skipped,
                "Scheduled export completed"
            );
        }
        Err(e) => {
            error!(operation = "scheduled_export_error", error = %e, "Scheduled export failed");
        }
    }
}

/// Schedule from the config file, with command-line overrides applied.
pub fn effective_schedule(config: &Config, schedule_override: Option<String>, no_startup_export: bool) -> SchedulerConfig {
    let from_file = config.scheduler.clone().unwrap_or_else(default_scheduler_config);
    SchedulerConfig {
        schedule: schedule_override.unwrap_or(from_file.schedule),
        run_on_startup: from_file.run_on_startup && !no_startup_export,
    }
}

pub async fn run_daemon(
    config: Config,
    paths: PathManager,
    schedule_override: Option<String>,
    no_startup_export: bool,
    output: &Output,
) -> Result<()> {
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {}", e))?;
    let schedule = effective_schedule(&config, schedule_override, no_startup_export);

    output.info(format!(
        "Starting daemon (schedule '{}'); logs go to {}",
        schedule.schedule,
        paths.daemon_log_file().display()
    ));

    let mut scheduler = Scheduler::new(config, paths, schedule)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create scheduler: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to start scheduler: {}", e))?;

    tokio::signal::ctrl_c().await?;
    info!(operation = "daemon_signal", "Interrupt received, shutting down");
    scheduler.shutdown().await
}
