//! Tool registry - central routing for MCP tools.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::content::{ContentItem, ToolResult};
use crate::rongda::DisclosureSource;

use super::disclosure::{self, SearchDisclosureRequest};

/// Tool descriptor conforming to the MCP specification.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Central registry for all MCP tools, constructed once at process start with
/// the disclosure backend it dispatches into.
pub struct ToolRegistry {
    source: Arc<dyn DisclosureSource>,
}

impl ToolRegistry {
    pub fn new(source: Arc<dyn DisclosureSource>) -> Self {
        Self { source }
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![disclosure::descriptor()]
    }

    /// Call a tool by name with the given arguments.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match name {
            disclosure::TOOL_NAME => self.call_search_disclosures(arguments).await,
            _ => ToolResult::error(format!(
                "Tool '{}' is not available. Available tools: {}",
                name,
                disclosure::TOOL_NAME
            )),
        }
    }

    async fn call_search_disclosures(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<SearchDisclosureRequest>(arguments) {
            Ok(request) => request,
            Err(err) => return ToolResult::error(err),
        };

        if let Err(validation_error) = request.validate() {
            return ToolResult::error(validation_error);
        }

        let reports = match self
            .source
            .search_disclosures(request.into_retrieval_request())
            .await
        {
            Ok(reports) => reports,
            Err(err) => return ToolResult::error(format!("Disclosure retrieval failed: {err}")),
        };

        let json_text =
            serde_json::to_string_pretty(&reports).unwrap_or_else(|_| "[]".to_string());

        ToolResult::success(vec![ContentItem::text(json_text)])
    }
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: Option<Value>) -> Result<T, String> {
    let value = arguments.unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|err| format!("Invalid arguments: {err}"))
}
