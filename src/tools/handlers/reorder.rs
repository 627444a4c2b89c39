use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::deck::{Deck, DeckError};
use crate::tools::definition::{ToolDefinition, ToolParam};
use crate::tools::error::ToolError;

/// Indices arrive as signed integers so that negative values are reported as
/// out of range instead of as a decoding failure.
#[derive(Debug, Deserialize)]
struct ReorderArgs {
    from_index: i64,
    to_index: i64,
}

pub fn reorder_tool() -> ToolDefinition {
    ToolDefinition {
        name: "reorder_slide",
        description: "Move the slide at from_index to to_index (0-based). \
                      Slides in between shift by one.",
        action: "reordering slide",
        params: vec![
            ToolParam::simple("from_index", "Current 0-based position.", "integer"),
            ToolParam::simple("to_index", "Target 0-based position.", "integer"),
        ],
        required: vec!["from_index", "to_index"],
        executor: Arc::new(execute_reorder),
    }
}

fn execute_reorder(deck: &mut Deck, args: Value) -> Result<String, ToolError> {
    let args: ReorderArgs = serde_json::from_value(args)?;
    let from = slide_index(args.from_index, deck.len())?;
    let to = slide_index(args.to_index, deck.len())?;
    deck.reorder_slide(from, to)?;
    Ok(format!("Moved slide from position {from} to {to}."))
}

fn slide_index(index: i64, len: usize) -> Result<usize, DeckError> {
    usize::try_from(index).map_err(|_| DeckError::IndexOutOfRange { index, len })
}
