//! Named tools that act on a document
//!
//! Each tool takes typed, schema-described parameters. The registry routes a raw JSON
//! payload to a tool by name, which is how extension messages (`{"action": ...}`) reach
//! the annotator.

pub mod attach_map_link;
pub mod list_map_links;

pub use attach_map_link::AttachMapLinkTool;
pub use list_map_links::{ListMapLinksParams, ListMapLinksTool};

use crate::annotate::{Annotator, PinRecord};
use crate::dom::DomTree;
use crate::error::{MapsError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a tool may touch while it runs
pub struct ToolContext<'a> {
    /// Document being read or annotated
    pub document: &'a mut DomTree,

    /// Annotator configured for this session
    pub annotator: &'a Annotator,

    /// Pins inserted while tools ran, in insertion order
    pub pins: Vec<PinRecord>,
}

impl<'a> ToolContext<'a> {
    pub fn new(document: &'a mut DomTree, annotator: &'a Annotator) -> Self {
        Self {
            document,
            annotator,
            pins: Vec::new(),
        }
    }
}

/// Outcome of a tool run. Failures are reported as errors, not as results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolResult {
    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// A tool with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext<'_>) -> Result<ToolResult>;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    /// Deserialize raw parameters and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let typed: Self::Params =
            serde_json::from_value(params).map_err(|e| MapsError::InvalidParams {
                tool: self.name().to_string(),
                reason: e.to_string(),
            })?;
        self.execute_typed(typed, context)
    }
}

/// Object-safe view of a [`Tool`] so tools with different parameter types share a registry
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AttachMapLinkTool);
        registry.register(ListMapLinksTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the tool called `name` with raw JSON parameters
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| MapsError::UnknownAction(name.to_string()))?;
        log::debug!("Executing tool {}", name);
        tool.execute(params, context)
    }
}
