//! Conversation orchestrator.
//!
//! A user message starts a loop: call the model, run the tools it asked for
//! in issue order, call the model again, until it answers without tools, the
//! call fails, or the iteration cap is hit. Every step appends one turn to
//! the session history, and [`TurnStream`] hands out a snapshot after each.

mod config;
mod convert;
mod orchestrator;
mod session;
mod turn;

pub use config::OrchestratorConfig;
pub use convert::{from_chat_response, to_chat_messages};
pub use orchestrator::{HistorySnapshot, Orchestrator, Termination, TurnOutcome, TurnStream};
pub use session::{Session, SessionId, SessionStore};
pub use turn::{ConversationTurn, History, HistoryError, ToolInvocation, TurnRole};
