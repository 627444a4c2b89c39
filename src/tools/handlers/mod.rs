mod agenda;
mod content;
mod outline;
mod reorder;
mod title;

use crate::tools::definition::ToolDefinition;

/// Every deck tool, in the order they are advertised.
pub fn deck_tools() -> Vec<ToolDefinition> {
    vec![
        title::title_tool(),
        agenda::agenda_tool(),
        content::content_tool(),
        reorder::reorder_tool(),
        outline::outline_tool(),
    ]
}
