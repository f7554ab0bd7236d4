use crate::annotate::find_map_links;
use crate::error::Result;
use crate::message::LIST_MAP_LINKS;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListMapLinksParams {
    /// Map search URL prefix the pins were built from
    #[serde(rename = "queryUrl", alias = "query_url")]
    pub query_url: String,
}

/// Tool that reports the map links already present in the document
#[derive(Default)]
pub struct ListMapLinksTool;

impl Tool for ListMapLinksTool {
    type Params = ListMapLinksParams;

    fn name(&self) -> &str {
        LIST_MAP_LINKS
    }

    fn execute_typed(&self, params: ListMapLinksParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let links = find_map_links(context.document, &params.query_url);

        Ok(ToolResult::success_with(serde_json::json!({
            "count": links.len(),
            "links": links
        })))
    }
}
