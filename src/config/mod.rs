//! TOML configuration. Every section is optional and falls back to defaults.

mod error;
mod load;
mod paths;
mod types;

pub use error::ConfigError;
pub use load::{load_config, parse_config, LoadedConfig};
pub use paths::ConfigPaths;
pub use types::{AppConfig, LoggingConfig, OrchestratorConfig, ToolsConfig};
