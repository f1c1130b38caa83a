use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use catalog_config::PathManager;
use commands::{config, daemon, export};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "sheetreel")]
#[command(about = "Sheetreel - Turn the editors' movie spreadsheet into the site catalog")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the sheet once and write the catalog
    #[command(long_about = "Fetch the sheet rows from the configured source, aggregate them into movies, episodes and banners, and write the catalog JSON. Flags override the matching configuration values for this run only.")]
    Export {
        /// Read rows from this file instead (.json for a JSON row dump, anything else is CSV)
        #[arg(long, value_name = "PATH", conflicts_with = "url")]
        input: Option<PathBuf>,

        /// Download a published CSV export from this URL instead
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Write the catalog here instead of the configured path
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Also write the skipped rows next to the catalog
        #[arg(long, action = ArgAction::SetTrue)]
        skip_report: bool,
    },
    /// Run exports on a schedule
    #[command(long_about = "Run as a long-lived process that exports the catalog on the configured cron schedule. A failed run is logged and the next one still happens. Stop with Ctrl-C.")]
    Daemon {
        /// Cron schedule with a seconds field (e.g. '0 */10 * * * *' for every 10 minutes)
        #[arg(long, value_name = "SCHEDULE")]
        schedule: Option<String>,

        /// Skip the export on startup
        #[arg(long, action = ArgAction::SetTrue)]
        no_startup_export: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();

    // The daemon logs to a rolling file; everything else to stderr
    let log_file = matches!(cli.command, Commands::Daemon { .. }).then(|| paths.daemon_log_file());
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Export {
            input,
            url,
            out,
            skip_report,
        } => {
            let overrides = export::ExportOverrides {
                input,
                url,
                out,
                skip_report,
            };
            export::run_export(config_path, &paths, overrides, cli.verbose, &output).await
        }
        Commands::Daemon {
            schedule,
            no_startup_export,
        } => {
            let config = config::load_config(config_path, &paths)?;
            daemon::run_daemon(config, paths, schedule, no_startup_export, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, config_path, &paths, &output),
    }
}
