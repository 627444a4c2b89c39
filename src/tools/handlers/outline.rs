//! Read-only view of the deck so the model can pick reorder indices.

use std::fmt::Write;
use std::sync::Arc;

use serde_json::Value;

use crate::deck::Deck;
use crate::tools::definition::ToolDefinition;
use crate::tools::error::ToolError;

pub fn outline_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_deck_outline",
        description: "List the current slides with their 0-based positions.",
        action: "reading deck outline",
        params: Vec::new(),
        required: Vec::new(),
        executor: Arc::new(execute_outline),
    }
}

fn execute_outline(deck: &mut Deck, _args: Value) -> Result<String, ToolError> {
    if deck.is_empty() {
        return Ok("The deck is empty.".to_string());
    }
    let mut output = format!("The deck has {} slides:", deck.len());
    for (idx, slide) in deck.slides().iter().enumerate() {
        let _ = write!(
            output,
            "\n{idx}. {}: {}",
            slide.kind(),
            slide.title().unwrap_or("(untitled)")
        );
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_positions_without_mutating() {
        let mut deck = Deck::new();
        deck.set_title_slide("Kickoff", None, Vec::new(), "")
            .expect("title");
        deck.set_agenda_slide(vec!["a".into()]).expect("agenda");
        let before = deck.clone();
        let out = execute_outline(&mut deck, Value::Null).expect("outline");
        assert_eq!(
            out,
            "The deck has 2 slides:\n0. title: Kickoff\n1. agenda: Agenda"
        );
        assert_eq!(deck, before);
    }

    #[test]
    fn empty_deck() {
        let mut deck = Deck::new();
        assert_eq!(
            execute_outline(&mut deck, Value::Null).expect("outline"),
            "The deck is empty."
        );
    }
}
