//! Browser automation tools
//!
//! Each tool is a small typed unit implementing [`Tool`]; the [`ToolRegistry`]
//! dispatches on tool name from untyped JSON parameters. Tools receive a
//! [`ToolContext`] that borrows the browser session and caches the extracted
//! DOM for the duration of one invocation.

pub mod click;
pub mod done;
pub mod dropdown;
pub mod input;
pub mod inspect;
pub mod keys;
pub mod navigate;
pub mod screenshot;
pub mod scroll;
pub mod tabs;
pub mod utils;
pub mod validate;
pub mod wait;

pub use click::ClickElementTool;
pub use done::DoneTool;
pub use dropdown::{GetDropdownOptionsTool, SelectDropdownOptionTool};
pub use input::InputTextTool;
pub use inspect::InspectPageTool;
pub use keys::SendKeysTool;
pub use navigate::{GoBackTool, GoToUrlTool, SearchGoogleTool};
pub use screenshot::ScreenshotTool;
pub use scroll::{ScrollDownTool, ScrollToTextTool, ScrollUpTool};
pub use tabs::{OpenTabTool, SwitchTabTool};
pub use validate::ValidatePageTool;
pub use wait::WaitTool;

use crate::browser::BrowserSession;
use crate::dom::DomTree;
use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of a tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Whether the tool completed its action
    pub success: bool,

    /// Structured payload; message-style results carry a `message` field
    pub data: Option<Value>,

    /// Failure description when `success` is false
    pub error: Option<String>,
}

impl ToolResult {
    /// A bare successful result
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    /// A successful result carrying structured data
    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    /// A successful result carrying a human-readable message
    pub fn message(text: impl Into<String>) -> Self {
        Self::success_with(serde_json::json!({ "message": text.into() }))
    }

    /// A failed result
    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    /// The `message` field of the payload, if this is a message-style result
    pub fn message_text(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }
}

/// Execution context passed to tools
///
/// Borrows the session and caches the extracted DOM so a tool that needs the
/// selector map more than once only pays for extraction once. The cache never
/// outlives the invocation.
pub struct ToolContext<'a> {
    /// The browser session tools operate on
    pub session: &'a BrowserSession,

    dom: Option<DomTree>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, dom: None }
    }

    /// Extract the DOM of the current tab, reusing a cached copy if present
    pub fn get_dom(&mut self) -> Result<&DomTree> {
        if self.dom.is_none() {
            self.dom = Some(self.session.extract_dom()?);
        }
        Ok(self.dom.as_ref().expect("dom cache populated above"))
    }

    /// Drop the cached DOM, e.g. after a navigation
    pub fn invalidate_dom(&mut self) {
        self.dom = None;
    }
}

/// A typed browser automation tool
pub trait Tool {
    /// Parameter type, deserialized from the incoming JSON
    type Params: DeserializeOwned + JsonSchema;

    /// Unique tool name used for dispatch
    fn name(&self) -> &str;

    /// JSON Schema of the parameter type
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    /// Execute with already-deserialized parameters
    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe wrapper so tools with different parameter types can share a registry
trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T> ErasedTool for T
where
    T: Tool + Send + Sync,
{
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params =
            serde_json::from_value(params).map_err(|e| BrowserError::InvalidParams(e.to_string()))?;
        self.execute_typed(typed, context)
    }
}

/// Registry of browser automation tools, dispatching by name
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// Create a registry with the full default tool set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SearchGoogleTool);
        registry.register(GoToUrlTool);
        registry.register(GoBackTool);
        registry.register(WaitTool);
        registry.register(ClickElementTool);
        registry.register(InputTextTool);
        registry.register(SwitchTabTool);
        registry.register(OpenTabTool);
        registry.register(InspectPageTool);
        registry.register(ScrollDownTool);
        registry.register(ScrollUpTool);
        registry.register(SendKeysTool);
        registry.register(ScrollToTextTool);
        registry.register(GetDropdownOptionsTool);
        registry.register(SelectDropdownOptionTool);
        registry.register(ValidatePageTool);
        registry.register(ScreenshotTool);
        registry.register(DoneTool);
        registry
    }

    /// Register a tool under its own name
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + Send + Sync + 'static,
    {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    /// Execute a tool by name with untyped JSON parameters
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.tools.get(name).ok_or_else(|| BrowserError::UnknownTool(name.to_string()))?;

        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }

    /// Names of all registered tools, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// JSON Schema of a registered tool's parameters
    pub fn schema(&self, name: &str) -> Option<Value> {
        self.tools.get(name).map(|t| t.parameters_schema())
    }

    /// Whether a tool is registered under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_tool_surface() {
        let registry = ToolRegistry::with_defaults();

        for name in [
            "search_google",
            "go_to_url",
            "go_back",
            "wait",
            "click_element",
            "input_text",
            "switch_tab",
            "open_tab",
            "inspect_page",
            "scroll_down",
            "scroll_up",
            "send_keys",
            "scroll_to_text",
            "get_dropdown_options",
            "select_dropdown_option",
            "validate_page",
            "screenshot",
            "done",
        ] {
            assert!(registry.contains(name), "missing tool: {}", name);
        }

        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_registry_schemas_are_objects() {
        let registry = ToolRegistry::with_defaults();

        for name in registry.names() {
            let schema = registry.schema(name).unwrap();
            assert!(schema.is_object(), "schema for {} is not an object", name);
        }
    }

    #[test]
    fn test_tool_result_constructors() {
        let ok = ToolResult::success();
        assert!(ok.success);
        assert!(ok.data.is_none());

        let msg = ToolResult::message("🔙 Navigated back");
        assert!(msg.success);
        assert_eq!(msg.message_text(), Some("🔙 Navigated back"));

        let failed = ToolResult::failure("element vanished");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("element vanished"));
        assert!(failed.message_text().is_none());
    }
}
