use serde::{Deserialize, Serialize};

const DEFAULT_MAX_ITERATIONS: usize = 15;
const DEFAULT_ITERATION_CAP_MESSAGE: &str = "I stopped after too many tool calls without finishing. \
The request may be too complex; try simplifying it or splitting it into smaller steps.";

/// Orchestrator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Maximum number of model calls per user message.
    pub max_iterations: usize,
    /// Prepended to every model request; never stored in the history.
    pub system_prompt: Option<String>,
    /// Assistant text appended when `max_iterations` is reached.
    pub iteration_cap_message: String,
}

impl OrchestratorConfig {
    /// `max_iterations`, never below one.
    pub fn effective_max_iterations(&self) -> usize {
        self.max_iterations.max(1)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: None,
            iteration_cap_message: DEFAULT_ITERATION_CAP_MESSAGE.to_string(),
        }
    }
}
