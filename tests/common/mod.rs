#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deckwright::chat::{ChatMessage, ChatProvider, ChatResponse, Tool};
use deckwright::{LLMError, ToolCall};
use serde_json::Value;

/// One scripted model reply.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(String),
    Calls(String, Vec<ToolCall>),
    Fail(String),
}

pub fn call(id: &str, name: &str, args: Value) -> ToolCall {
    ToolCall::function(id, name, args.to_string())
}

#[derive(Debug)]
struct ScriptedResponse {
    text: String,
    calls: Vec<ToolCall>,
}

impl ChatResponse for ScriptedResponse {
    fn text(&self) -> Option<String> {
        Some(self.text.clone())
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        if self.calls.is_empty() {
            None
        } else {
            Some(self.calls.clone())
        }
    }
}

/// Replays scripted steps and records every request. Once the script runs
/// out, `fallback` is repeated.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    steps: Arc<Mutex<VecDeque<Step>>>,
    fallback: Option<Step>,
    pub requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    pub advertised: Arc<Mutex<Vec<Vec<String>>>>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            ..Self::default()
        }
    }

    pub fn repeating(step: Step) -> Self {
        Self {
            fallback: Some(step),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn request(&self, index: usize) -> Vec<ChatMessage> {
        self.requests.lock().expect("requests lock")[index].clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(messages.to_vec());
        self.advertised.lock().expect("advertised lock").push(
            tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.function.name.clone())
                .collect(),
        );

        let step = self
            .steps
            .lock()
            .expect("steps lock")
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Step::Reply("script exhausted".into()));

        match step {
            Step::Reply(text) => Ok(Box::new(ScriptedResponse {
                text,
                calls: Vec::new(),
            })),
            Step::Calls(text, calls) => {
                // Give repeated scripted calls distinct ids.
                let calls = calls
                    .into_iter()
                    .map(|mut c| {
                        c.id = format!("{}-{n}", c.id);
                        c
                    })
                    .collect();
                Ok(Box::new(ScriptedResponse { text, calls }))
            }
            Step::Fail(message) => Err(LLMError::Provider(message)),
        }
    }
}
