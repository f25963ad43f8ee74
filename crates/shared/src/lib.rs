pub mod events;
pub mod extract;
pub mod macros;
pub mod schemas;
pub mod tools;
pub mod types;

#[doc(hidden)]
pub use paste;

pub use extract::{extract, RawToolCall, ToolCall};
pub use schemas::{ParameterSchema, Tool, ToolSchema, Toolbelt};
pub use tools::{get_toolbelts, get_tools, use_tool};
