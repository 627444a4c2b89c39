//! Deckwright builds slide decks by letting a language model call deck tools.
//!
//! The crate is organised leaves first:
//!
//! - [`deck`]: the ordered slide deck and its positional rules
//!   (title first, agenda second, content after).
//! - [`tools`]: the registry that turns a model-issued tool call into a deck
//!   mutation and a short result string.
//! - [`conversation`]: the orchestrator that alternates model calls and tool
//!   dispatch until the model stops asking for tools.
//!
//! The model itself is reached through the [`chat::ChatProvider`] trait, so any
//! backend (or a scripted test double) can drive a session.

use serde::{Deserialize, Serialize};

pub mod chat;
pub mod config;
pub mod conversation;
pub mod deck;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod retry;
pub mod tools;

pub use conversation::{Orchestrator, Session, Termination, TurnOutcome};
pub use deck::{Deck, Slide, SlideKind};
pub use error::LLMError;
pub use tools::ToolRegistry;

/// Tool call represents a function call that an LLM wants to make.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct ToolCall {
    /// The ID of the tool call.
    pub id: String,
    /// The type of the tool call (usually "function").
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to call.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Builds a function-type tool call.
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// FunctionCall contains details about which function to call and with what arguments.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function, typically serialized as a JSON string.
    pub arguments: String,
}
