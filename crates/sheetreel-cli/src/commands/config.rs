use std::path::Path;

use catalog_config::{default_scheduler_config, Config, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::debug;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config_path, paths, output),
        ConfigCommands::Init { force } => init_config(config_path, paths, force, output),
    }
}

/// Load the configuration from an explicit path, the default location, or
/// fall back to built-in defaults when no file exists at the default location.
pub fn load_config(config_path: Option<&Path>, paths: &PathManager) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_file(path)
            .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?,
        None => {
            let path = paths.config_file();
            if path.exists() {
                Config::load_from_file(&path)
                    .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?
            } else {
                debug!(path = %path.display(), "No config file, using defaults");
                Config::default()
            }
        }
    };
    Ok(config)
}

/// Configuration written by `config init`.
pub fn starter_config(paths: &PathManager) -> Config {
    let mut config = Config::default();
    config.source.path = Some(paths.data_dir().join("sheet.csv"));
    config.output.path = Some(paths.catalog_file());
    config.scheduler = Some(default_scheduler_config());
    config
}

fn show_config(config_path: Option<&Path>, paths: &PathManager, output: &Output) -> Result<()> {
    let config = load_config(config_path, paths)?;

    match output.format() {
        OutputFormat::Human => {
            let text = toml::to_string_pretty(&config)?;
            output.println(text);
            if let Err(e) = config.validate() {
                output.warn(format!("Configuration is not usable yet: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&config)?);
        }
    }
    Ok(())
}

fn init_config(config_path: Option<&Path>, paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let target = config_path.map(Path::to_path_buf).unwrap_or_else(|| paths.config_file());
    if target.exists() && !force {
        return Err(eyre!(
            "{} already exists (use --force to overwrite)",
            target.display()
        ));
    }

    starter_config(paths)
        .save_to_file(&target)
        .map_err(|e| eyre!("Failed to write config to {}: {}", target.display(), e))?;
    output.success(format!("Wrote default configuration to {}", target.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_starter_config_validates() {
        let paths = PathManager::with_base("/srv/sheetreel".into());
        let config = starter_config(&paths);
        assert!(config.validate().is_ok());
        assert_eq!(config.output.path, Some(paths.catalog_file()));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let output = Output::new(OutputFormat::Json, true);

        init_config(None, &paths, false, &output).unwrap();
        assert!(paths.config_file().exists());
        assert!(init_config(None, &paths, false, &output).is_err());
        assert!(init_config(None, &paths, true, &output).is_ok());

        let loaded = load_config(None, &paths).unwrap();
        assert!(loaded.scheduler.is_some());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let config = load_config(None, &paths).unwrap();
        assert!(config.source.path.is_none());

        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), &paths).is_err());
    }
}
