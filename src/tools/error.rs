//! Tool execution error types.

use crate::deck::DeckError;

/// Errors raised while executing a tool. The registry turns every one of
/// them into tool-turn text; none reaches the orchestrator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToolError {
    /// Arguments could not be decoded into what the tool expects.
    #[error("invalid tool arguments: {0}")]
    InvalidArgs(String),

    /// The deck rejected the operation.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// Tool not found in registry.
    #[error("tool not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::InvalidArgs(err.to_string())
    }
}
