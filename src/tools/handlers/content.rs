use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::deck::Deck;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

#[derive(Debug, Deserialize)]
struct ContentArgs {
    title: String,
    subtitle: Option<String>,
    columns: Vec<Vec<String>>,
}

pub fn content_tool() -> ToolDefinition {
    ToolDefinition {
        name: "add_content_slide",
        description: "Append a content slide with one to three columns of bullet points.",
        action: "adding content slide",
        params: vec![
            ToolParam::simple("title", "Slide title.", "string"),
            ToolParam::simple("subtitle", "Optional subtitle.", "string"),
            ToolParam::nested_array(
                "columns",
                "One to three columns, each a non-empty list of bullet points.",
                "string",
            ),
        ],
        required: vec!["title", "columns"],
        executor: Arc::new(execute_content),
    }
}

fn execute_content(deck: &mut Deck, args: Value) -> Result<String, ToolError> {
    let args: ContentArgs = serde_json::from_value(args)?;
    let columns = args.columns.len();
    deck.add_content_slide(args.title, args.subtitle.as_deref(), args.columns)?;
    Ok(format!(
        "Content slide added at position {} with {columns} column(s).",
        deck.len() - 1
    ))
}
