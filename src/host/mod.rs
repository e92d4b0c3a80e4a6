//! Adapters to the host environment: solution discovery and the inspector process

pub mod discovery;
pub mod tool;

pub use discovery::find_solutions;
pub use tool::{CommandTool, InspectionTool, ToolError};
