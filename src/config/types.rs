use serde::{Deserialize, Serialize};

pub use crate::conversation::OrchestratorConfig;
use crate::retry::RetryPolicy;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub orchestrator: OrchestratorConfig,
    pub tools: ToolsConfig,
    pub retry: RetryPolicy,
    pub logging: LoggingConfig,
}

/// Which deck tools are advertised. An empty list enables all of them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub enabled: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
