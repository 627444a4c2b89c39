use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

/// Loads the config file, or defaults when it does not exist.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    let (config, config_exists) = read_config(&paths.config_file)?;
    log::debug!(
        "config loaded from {} (exists: {config_exists})",
        paths.config_file.display()
    );
    Ok(LoadedConfig {
        config,
        paths,
        config_exists,
    })
}

pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn read_config(path: &Path) -> Result<(AppConfig, bool), ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok((parse_config(&contents)?, true)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok((AppConfig::default(), false))
        }
        Err(err) => Err(ConfigError::Io(err)),
    }
}
