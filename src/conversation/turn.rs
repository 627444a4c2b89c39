use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ToolCall;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
    Tool,
}

/// A tool call requested by an assistant turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    /// Raw JSON argument payload as issued by the model.
    pub arguments: String,
}

impl ToolInvocation {
    pub fn from_call(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            name: call.function.name.clone(),
            arguments: call.function.arguments.clone(),
        }
    }

    pub fn as_tool_call(&self) -> ToolCall {
        ToolCall::function(&self.id, &self.name, &self.arguments)
    }
}

/// One entry of the conversation history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    /// Text of the turn; may be empty on assistant turns that only call tools.
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<ToolInvocation>,
    /// For tool turns, the invocation this turn answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_invocation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    fn new(role: TurnRole, content: String) -> Self {
        Self {
            role,
            content,
            tool_invocations: Vec::new(),
            tool_invocation_id: None,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content.into())
    }

    pub fn assistant(content: impl Into<String>, tool_invocations: Vec<ToolInvocation>) -> Self {
        Self {
            tool_invocations,
            ..Self::new(TurnRole::Assistant, content.into())
        }
    }

    pub fn tool(invocation: &ToolInvocation, output: impl Into<String>) -> Self {
        Self {
            tool_invocation_id: Some(invocation.id.clone()),
            tool_name: Some(invocation.name.clone()),
            ..Self::new(TurnRole::Tool, output.into())
        }
    }

    pub fn has_tool_invocations(&self) -> bool {
        !self.tool_invocations.is_empty()
    }
}

/// Ways a history can violate the tool-turn protocol.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("turn {index} answers no pending tool invocation")]
    UnexpectedToolTurn { index: usize },
    #[error("turn {index} answers {found:?} but {expected} was next")]
    OutOfOrderToolTurn {
        index: usize,
        expected: String,
        found: Option<String>,
    },
    #[error("turn {index} arrived while invocations {pending:?} were unanswered")]
    UnansweredInvocations { index: usize, pending: Vec<String> },
}

/// Ordered conversation history of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<ConversationTurn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a history from stored turns, e.g. a snapshot. Call
    /// [`History::validate`] before trusting it.
    pub fn from_turns(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub(crate) fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Invocations of the latest assistant turn that no tool turn has
    /// answered yet, in issue order.
    pub fn pending_invocations(&self) -> Vec<ToolInvocation> {
        let Some(start) = self
            .turns
            .iter()
            .rposition(|turn| turn.role == TurnRole::Assistant)
        else {
            return Vec::new();
        };
        let answered: Vec<&str> = self.turns[start + 1..]
            .iter()
            .filter(|turn| turn.role == TurnRole::Tool)
            .filter_map(|turn| turn.tool_invocation_id.as_deref())
            .collect();
        self.turns[start]
            .tool_invocations
            .iter()
            .filter(|inv| !answered.contains(&inv.id.as_str()))
            .cloned()
            .collect()
    }

    /// Checks that every tool turn answers, in issue order, an invocation of
    /// the preceding assistant turn, and that no user or assistant turn
    /// arrives while invocations are still open.
    pub fn validate(&self) -> Result<(), HistoryError> {
        let mut pending: VecDeque<&str> = VecDeque::new();
        for (index, turn) in self.turns.iter().enumerate() {
            match turn.role {
                TurnRole::Tool => {
                    let Some(expected) = pending.pop_front() else {
                        return Err(HistoryError::UnexpectedToolTurn { index });
                    };
                    if turn.tool_invocation_id.as_deref() != Some(expected) {
                        return Err(HistoryError::OutOfOrderToolTurn {
                            index,
                            expected: expected.to_string(),
                            found: turn.tool_invocation_id.clone(),
                        });
                    }
                }
                TurnRole::User | TurnRole::Assistant => {
                    if !pending.is_empty() {
                        return Err(HistoryError::UnansweredInvocations {
                            index,
                            pending: pending.iter().map(|id| id.to_string()).collect(),
                        });
                    }
                    pending = turn.tool_invocations.iter().map(|i| i.id.as_str()).collect();
                }
            }
        }
        Ok(())
    }
}
