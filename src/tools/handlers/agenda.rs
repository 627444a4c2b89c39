use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::deck::Deck;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

#[derive(Debug, Deserialize)]
struct AgendaArgs {
    points: Vec<String>,
}

pub fn agenda_tool() -> ToolDefinition {
    ToolDefinition {
        name: "set_agenda_slide",
        description: "Create or replace the agenda slide. It always follows the title slide.",
        action: "setting agenda slide",
        params: vec![ToolParam::array(
            "points",
            "Agenda items, at least one.",
            "string",
        )],
        required: vec!["points"],
        executor: Arc::new(execute_agenda),
    }
}

fn execute_agenda(deck: &mut Deck, args: Value) -> Result<String, ToolError> {
    let args: AgendaArgs = serde_json::from_value(args)?;
    let count = args.points.len();
    deck.set_agenda_slide(args.points)?;
    Ok(format!("Agenda slide set with {count} points."))
}
