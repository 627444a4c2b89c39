//! Tool registry: the deck operations the model may call.

mod definition;
mod error;
mod handlers;
mod registry;

pub use definition::{ToolDefinition, ToolExecutor, ToolParam};
pub use error::ToolError;
pub use handlers::deck_tools;
pub use registry::{ToolRegistry, UNKNOWN_TOOL_PREFIX};
