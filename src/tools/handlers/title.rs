use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::deck::Deck;
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

#[derive(Debug, Deserialize)]
struct TitleArgs {
    title: String,
    subtitle: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    date: String,
}

pub fn title_tool() -> ToolDefinition {
    ToolDefinition {
        name: "set_title_slide",
        description: "Create or replace the title slide. It is always the first slide.",
        action: "setting title slide",
        params: vec![
            ToolParam::simple("title", "Presentation title.", "string"),
            ToolParam::simple("subtitle", "Optional subtitle.", "string"),
            ToolParam::array("authors", "Author names, in display order.", "string"),
            ToolParam::simple("date", "Date shown on the title slide.", "string"),
        ],
        required: vec!["title"],
        executor: Arc::new(execute_title),
    }
}

fn execute_title(deck: &mut Deck, args: Value) -> Result<String, ToolError> {
    let args: TitleArgs = serde_json::from_value(args)?;
    let slide = deck.set_title_slide(
        args.title,
        args.subtitle.as_deref(),
        args.authors,
        args.date,
    )?;
    Ok(format!(
        "Title slide set to \"{}\".",
        slide.title().unwrap_or_default()
    ))
}
