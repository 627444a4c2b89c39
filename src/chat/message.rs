use crate::ToolCall;

/// Who a message is from, in provider terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Text,
    ToolUse(Vec<ToolCall>),
    /// One answered call; its `arguments` field carries the tool output.
    ToolResult(Vec<ToolCall>),
}

/// One entry of a provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub message_type: MessageType,
    pub content: String,
}

impl ChatMessage {
    pub fn system() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::System)
    }

    pub fn user() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::User)
    }

    pub fn assistant() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::Assistant)
    }

    pub fn tool() -> ChatMessageBuilder {
        ChatMessageBuilder::new(ChatRole::Tool)
    }

    /// Tool calls carried by this message, if any.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match &self.message_type {
            MessageType::ToolUse(calls) | MessageType::ToolResult(calls) => calls,
            MessageType::Text => &[],
        }
    }
}

#[derive(Debug)]
pub struct ChatMessageBuilder {
    role: ChatRole,
    message_type: MessageType,
    content: String,
}

impl ChatMessageBuilder {
    pub fn new(role: ChatRole) -> Self {
        Self {
            role,
            message_type: MessageType::default(),
            content: String::new(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Marks the message as requesting `calls`.
    pub fn tool_use(mut self, calls: Vec<ToolCall>) -> Self {
        self.message_type = MessageType::ToolUse(calls);
        self
    }

    /// Marks the message as answering `calls`.
    pub fn tool_result(mut self, calls: Vec<ToolCall>) -> Self {
        self.message_type = MessageType::ToolResult(calls);
        self
    }

    pub fn build(self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            message_type: self.message_type,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_use_builder_keeps_calls() {
        let call = ToolCall::function("call_1", "reorder_slide", "{}");
        let msg = ChatMessage::assistant()
            .content("moving")
            .tool_use(vec![call.clone()])
            .build();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.tool_calls(), &[call]);
    }

    #[test]
    fn text_messages_have_no_calls() {
        let msg = ChatMessage::user().content("hi").build();
        assert!(msg.tool_calls().is_empty());
        assert_eq!(msg.message_type, MessageType::Text);
    }
}
