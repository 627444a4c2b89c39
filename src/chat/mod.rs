mod message;
mod tool;
mod traits;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole, MessageType};
pub use tool::{FunctionTool, Tool};
pub use traits::{ChatProvider, ChatResponse};
