//! Extension message boundary
//!
//! Messages arrive as JSON objects carrying an `action` plus the action's own fields,
//! e.g. `{"action": "attachMapLink", "content": "...", "queryUrl": "..."}`. The action
//! names a registered tool and the whole object is handed to it as parameters.

use crate::error::{MapsError, Result};
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action name of the annotation message
pub const ATTACH_MAP_LINK: &str = "attachMapLink";

/// Action name of the message listing existing pins
pub const LIST_MAP_LINKS: &str = "listMapLinks";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub action: String,

    /// Remaining fields, passed to the tool untouched
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Message {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| MapsError::InvalidParams {
            tool: "message".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Route a message to the tool named by its action
pub fn dispatch(registry: &ToolRegistry, message: Message, context: &mut ToolContext<'_>) -> Result<ToolResult> {
    log::debug!("Dispatching message with action {}", message.action);
    registry.execute(&message.action, Value::Object(message.payload), context)
}

/// Parse a raw JSON message and route it
pub fn dispatch_raw(registry: &ToolRegistry, raw: &str, context: &mut ToolContext<'_>) -> Result<ToolResult> {
    dispatch(registry, Message::parse(raw)?, context)
}
