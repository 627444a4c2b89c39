use async_trait::async_trait;

use crate::error::LLMError;
use crate::ToolCall;

use super::message::ChatMessage;
use super::tool::Tool;

/// What a provider returns for one request: text, tool calls, or both.
pub trait ChatResponse: std::fmt::Debug + Send + Sync {
    fn text(&self) -> Option<String>;
    fn tool_calls(&self) -> Option<Vec<ToolCall>>;
}

/// Trait for providers that support chat-style interactions with tools.
///
/// The orchestrator awaits one call at a time; implementations do not need to
/// handle concurrent requests for the same session.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.chat_with_tools(messages, None).await
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError>;
}
