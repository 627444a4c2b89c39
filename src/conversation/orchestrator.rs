use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use futures::stream::{self, Stream};
use serde::Serialize;

use crate::chat::{ChatProvider, Tool};
use crate::config::AppConfig;
use crate::retry::RetryingProvider;
use crate::tools::ToolRegistry;

use super::config::OrchestratorConfig;
use super::convert::{from_chat_response, to_chat_messages};
use super::session::Session;
use super::turn::{ConversationTurn, ToolInvocation, TurnRole};

/// Why a turn loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The model answered without requesting tools.
    Normal,
    /// The model call failed.
    Error,
    /// The model kept requesting tools until the iteration cap.
    IterationCap,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Termination::Normal => "normal",
            Termination::Error => "error",
            Termination::IterationCap => "iteration_cap",
        };
        write!(f, "{name}")
    }
}

/// History as it stood right after one turn was appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub turns: Vec<ConversationTurn>,
    /// Model calls made so far for this user message.
    pub iteration: usize,
    /// Set on the last snapshot of a turn loop.
    pub termination: Option<Termination>,
}

impl HistorySnapshot {
    pub fn latest(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }
}

/// Result of driving a turn loop to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub termination: Termination,
    /// Text of the final assistant turn.
    pub reply: String,
    /// Turns appended by this loop, the user turn included.
    pub appended_turns: usize,
}

/// Drives the model/tool loop for sessions.
pub struct Orchestrator {
    provider: Arc<dyn ChatProvider>,
    registry: ToolRegistry,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn ChatProvider>, registry: ToolRegistry) -> Self {
        Self {
            provider,
            registry,
            config: OrchestratorConfig::default(),
        }
    }

    /// Wires a provider from application config: retries around the provider
    /// and the configured tool selection.
    pub fn from_app_config(provider: Arc<dyn ChatProvider>, config: &AppConfig) -> Self {
        let provider = RetryingProvider::new(provider, config.retry.clone());
        Self::new(Arc::new(provider), ToolRegistry::from_config(&config.tools))
            .with_config(config.orchestrator.clone())
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Starts a turn loop for `message`. Nothing happens until the returned
    /// stream is polled; dropping it early keeps whatever was already applied.
    pub fn send<'a>(&'a self, session: &'a mut Session, message: impl Into<String>) -> TurnStream<'a> {
        TurnStream {
            provider: self.provider.as_ref(),
            registry: &self.registry,
            config: &self.config,
            catalog: self.registry.tools(),
            session,
            state: StepState::Start(message.into()),
            iteration: 0,
            appended: 0,
            termination: None,
        }
    }

    /// Runs a turn loop to completion.
    pub async fn run(&self, session: &mut Session, message: impl Into<String>) -> TurnOutcome {
        let mut turn = self.send(session, message);
        while turn.next_snapshot().await.is_some() {}
        turn.outcome()
    }
}

enum StepState {
    Start(String),
    AwaitModel,
    Dispatch(VecDeque<ToolInvocation>),
    Done,
}

/// One user message worth of model calls and tool dispatches.
///
/// Each call to [`TurnStream::next_snapshot`] appends exactly one turn and
/// returns the history right after it.
pub struct TurnStream<'a> {
    provider: &'a dyn ChatProvider,
    registry: &'a ToolRegistry,
    config: &'a OrchestratorConfig,
    catalog: Vec<Tool>,
    session: &'a mut Session,
    state: StepState,
    iteration: usize,
    appended: usize,
    termination: Option<Termination>,
}

impl<'a> TurnStream<'a> {
    pub async fn next_snapshot(&mut self) -> Option<HistorySnapshot> {
        match std::mem::replace(&mut self.state, StepState::Done) {
            StepState::Done => return None,
            StepState::Start(text) => {
                if self.close_abandoned_invocation() {
                    self.state = StepState::Start(text);
                } else {
                    self.push(ConversationTurn::user(text));
                    self.state = StepState::AwaitModel;
                }
            }
            StepState::AwaitModel => self.consult_model().await,
            StepState::Dispatch(mut pending) => {
                if let Some(invocation) = pending.pop_front() {
                    self.dispatch(&invocation);
                }
                self.state = if pending.is_empty() {
                    StepState::AwaitModel
                } else {
                    StepState::Dispatch(pending)
                };
            }
        }
        Some(self.snapshot())
    }

    /// Adapts the loop into a `Stream` of snapshots.
    pub fn into_stream(self) -> impl Stream<Item = HistorySnapshot> + 'a {
        stream::unfold(self, |mut turn| async move {
            let snapshot = turn.next_snapshot().await?;
            Some((snapshot, turn))
        })
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Summary of the loop. Before the loop has ended the termination reads
    /// as `Error`.
    pub fn outcome(&self) -> TurnOutcome {
        let reply = self
            .session
            .history
            .turns()
            .iter()
            .rev()
            .find(|turn| turn.role == TurnRole::Assistant)
            .map(|turn| turn.content.clone())
            .unwrap_or_default();
        TurnOutcome {
            termination: self.termination.unwrap_or(Termination::Error),
            reply,
            appended_turns: self.appended,
        }
    }

    async fn consult_model(&mut self) {
        if self.iteration >= self.config.effective_max_iterations() {
            log::warn!(
                "session {}: stopping after {} model calls",
                self.session.id(),
                self.iteration
            );
            self.push(ConversationTurn::assistant(
                self.config.iteration_cap_message.clone(),
                Vec::new(),
            ));
            self.finish(Termination::IterationCap);
            return;
        }

        self.iteration += 1;
        let messages = to_chat_messages(
            self.session.history.turns(),
            self.config.system_prompt.as_deref(),
        );
        let tools = if self.catalog.is_empty() {
            None
        } else {
            Some(self.catalog.as_slice())
        };
        log::debug!(
            "session {}: model call {} with {} messages",
            self.session.id(),
            self.iteration,
            messages.len()
        );

        let result = self.provider.chat_with_tools(&messages, tools).await;
        match result {
            Ok(response) => {
                let turn = from_chat_response(response.as_ref());
                let pending: VecDeque<_> = turn.tool_invocations.iter().cloned().collect();
                self.push(turn);
                if pending.is_empty() {
                    self.finish(Termination::Normal);
                } else {
                    self.state = StepState::Dispatch(pending);
                }
            }
            Err(err) => {
                log::warn!("session {}: LLM call failed: {err}", self.session.id());
                self.push(ConversationTurn::assistant(
                    format!("LLM call failed: {err}"),
                    Vec::new(),
                ));
                self.finish(Termination::Error);
            }
        }
    }

    fn dispatch(&mut self, invocation: &ToolInvocation) {
        let output = self.registry.execute(
            &invocation.name,
            &invocation.arguments,
            &mut self.session.deck,
        );
        self.push(ConversationTurn::tool(invocation, output));
    }

    /// Answers one invocation left open by a previously abandoned loop, so
    /// the next model call sees a well-formed history. Returns false when
    /// nothing was open.
    fn close_abandoned_invocation(&mut self) -> bool {
        let Some(invocation) = self.session.history.pending_invocations().into_iter().next() else {
            return false;
        };
        log::debug!("closing abandoned invocation {}", invocation.id);
        self.push(ConversationTurn::tool(
            &invocation,
            format!(
                "Error running {}: the previous request was interrupted before this call ran",
                invocation.name
            ),
        ));
        true
    }

    fn push(&mut self, turn: ConversationTurn) {
        self.session.history.push(turn);
        self.appended += 1;
    }

    fn finish(&mut self, termination: Termination) {
        log::debug!(
            "session {}: turn loop ended ({termination}) after {} model calls",
            self.session.id(),
            self.iteration
        );
        self.termination = Some(termination);
        self.state = StepState::Done;
    }

    fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            turns: self.session.history.turns().to_vec(),
            iteration: self.iteration,
            termination: self.termination,
        }
    }
}
