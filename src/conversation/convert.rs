//! Adapter between session history and the provider message format, one
//! function per direction.

use std::collections::HashSet;

use uuid::Uuid;

use crate::chat::{ChatMessage, ChatResponse};

use super::turn::{ConversationTurn, ToolInvocation, TurnRole};

/// Builds the provider request for `turns`, with an optional system prompt
/// in front.
pub fn to_chat_messages(turns: &[ConversationTurn], system_prompt: Option<&str>) -> Vec<ChatMessage> {
    let system = system_prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .map(|prompt| ChatMessage::system().content(prompt).build());
    system
        .into_iter()
        .chain(turns.iter().map(to_chat_message))
        .collect()
}

fn to_chat_message(turn: &ConversationTurn) -> ChatMessage {
    match turn.role {
        TurnRole::User => ChatMessage::user().content(&turn.content).build(),
        TurnRole::Assistant if turn.has_tool_invocations() => ChatMessage::assistant()
            .content(&turn.content)
            .tool_use(
                turn.tool_invocations
                    .iter()
                    .map(ToolInvocation::as_tool_call)
                    .collect(),
            )
            .build(),
        TurnRole::Assistant => ChatMessage::assistant().content(&turn.content).build(),
        TurnRole::Tool => {
            let answered = ToolInvocation {
                id: turn.tool_invocation_id.clone().unwrap_or_default(),
                name: turn.tool_name.clone().unwrap_or_default(),
                arguments: turn.content.clone(),
            };
            ChatMessage::tool()
                .content(&turn.content)
                .tool_result(vec![answered.as_tool_call()])
                .build()
        }
    }
}

/// Turns a provider response into an assistant turn. Missing or repeated
/// invocation ids are replaced so every tool turn can answer exactly one
/// invocation.
pub fn from_chat_response(response: &dyn ChatResponse) -> ConversationTurn {
    let text = response.text().unwrap_or_default();
    let mut seen = HashSet::new();
    let invocations = response
        .tool_calls()
        .unwrap_or_default()
        .iter()
        .map(|call| {
            let mut invocation = ToolInvocation::from_call(call);
            if invocation.id.trim().is_empty() || !seen.insert(invocation.id.clone()) {
                invocation.id = format!("call_{}", Uuid::new_v4().simple());
                log::debug!("assigned id {} to {} call", invocation.id, invocation.name);
                seen.insert(invocation.id.clone());
            }
            invocation
        })
        .collect();
    ConversationTurn::assistant(text, invocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatRole, MessageType};
    use crate::ToolCall;

    #[derive(Debug)]
    struct Canned {
        text: Option<String>,
        calls: Vec<ToolCall>,
    }

    impl ChatResponse for Canned {
        fn text(&self) -> Option<String> {
            self.text.clone()
        }

        fn tool_calls(&self) -> Option<Vec<ToolCall>> {
            if self.calls.is_empty() {
                None
            } else {
                Some(self.calls.clone())
            }
        }
    }

    #[test]
    fn system_prompt_leads_and_roles_map() {
        let inv = ToolInvocation {
            id: "c1".into(),
            name: "get_deck_outline".into(),
            arguments: "{}".into(),
        };
        let turns = vec![
            ConversationTurn::user("make slides"),
            ConversationTurn::assistant("", vec![inv.clone()]),
            ConversationTurn::tool(&inv, "The deck is empty."),
        ];
        let messages = to_chat_messages(&turns, Some("You build decks."));
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::System, ChatRole::User, ChatRole::Assistant, ChatRole::Tool]
        );
        assert_eq!(messages[2].tool_calls()[0].function.name, "get_deck_outline");
        match &messages[3].message_type {
            MessageType::ToolResult(calls) => {
                assert_eq!(calls[0].id, "c1");
                assert_eq!(calls[0].function.arguments, "The deck is empty.");
            }
            other => panic!("unexpected message type {other:?}"),
        }
    }

    #[test]
    fn blank_system_prompt_is_skipped() {
        let messages = to_chat_messages(&[ConversationTurn::user("hi")], Some("  "));
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn missing_and_duplicate_ids_are_replaced() {
        let response = Canned {
            text: None,
            calls: vec![
                ToolCall::function("", "reorder_slide", "{}"),
                ToolCall::function("dup", "reorder_slide", "{}"),
                ToolCall::function("dup", "reorder_slide", "{}"),
            ],
        };
        let turn = from_chat_response(&response);
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.content, "");
        let ids: HashSet<_> = turn.tool_invocations.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(turn.tool_invocations[1].id, "dup");
        assert!(turn.tool_invocations[0].id.starts_with("call_"));
    }
}
