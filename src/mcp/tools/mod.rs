//! MCP Tools module - defines tools exposed via JSON-RPC.
//!
//! Each tool provides a descriptor (name, description, input schema),
//! argument parsing and validation, and result formatting.

pub mod disclosure;
pub mod registry;

pub use registry::ToolRegistry;
