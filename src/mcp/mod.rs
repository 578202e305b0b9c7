//! MCP (Model Context Protocol) server implementation for browser automation
//!
//! Exposes the tool registry over rmcp. The browser session is created by the
//! `initialize_browser` tool and torn down by `close_browser`; every other
//! browser tool reports an error until a session exists.

pub mod handler;
pub use handler::BrowserServer;

use crate::tools::done::DoneParams;
use crate::tools::dropdown::{GetDropdownOptionsParams, SelectDropdownOptionParams};
use crate::tools::input::InputTextParams;
use crate::tools::inspect::InspectPageParams;
use crate::tools::keys::SendKeysParams;
use crate::tools::navigate::{GoBackParams, GoToUrlParams, SearchGoogleParams};
use crate::tools::screenshot::ScreenshotParams;
use crate::tools::scroll::{ScrollParams, ScrollToTextParams};
use crate::tools::tabs::{OpenTabParams, SwitchTabParams};
use crate::tools::validate::ValidatePageParams;
use crate::tools::wait::WaitParams;
use crate::tools::{click::ClickElementParams, ToolResult as InternalToolResult};
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for initialize_browser
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InitializeBrowserParams {
    /// Run the browser in headless mode (usually false when attaching to the
    /// user's own browser); defaults to the server's configuration
    #[serde(default)]
    pub headless: Option<bool>,

    /// The task the agent is going to perform
    #[serde(default)]
    pub task: String,
}

/// Parameters for close_browser (none)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CloseBrowserParams {}

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        if let Some(message) = result.message_text() {
            return Ok(CallToolResult::success(vec![Content::text(message.to_string())]));
        }

        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

fn to_json<T: Serialize>(params: T) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(params).map_err(|e| McpError::internal_error(e.to_string(), None))
}

#[tool_router]
impl BrowserServer {
    /// Start a browser session attached to the user's default browser
    #[tool(description = "Initialize the browser using the user's default browser with all login \
                          sessions. Close other browser instances before calling this. Returns a \
                          system prompt describing the available actions and the task.")]
    fn initialize_browser(
        &self,
        params: Parameters<InitializeBrowserParams>,
    ) -> Result<CallToolResult, McpError> {
        let prompt = self.open_session(params.0.headless, &params.0.task)?;
        Ok(CallToolResult::success(vec![Content::text(prompt)]))
    }

    /// Close the current browser session
    #[tool(description = "Close the current browser instance")]
    fn close_browser(
        &self,
        _params: Parameters<CloseBrowserParams>,
    ) -> Result<CallToolResult, McpError> {
        self.close_session();
        Ok(CallToolResult::success(vec![Content::text("Browser closed successfully")]))
    }

    /// Search Google in the current tab
    #[tool(description = "Search the query in Google in the current tab")]
    fn search_google(
        &self,
        params: Parameters<SearchGoogleParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("search_google", to_json(params.0)?)
    }

    /// Navigate to a URL
    #[tool(description = "Navigate to the given URL in the current tab")]
    fn go_to_url(&self, params: Parameters<GoToUrlParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("go_to_url", to_json(params.0)?)
    }

    /// Go back in history
    #[tool(description = "Go back to the previous page")]
    fn go_back(&self, params: Parameters<GoBackParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("go_back", to_json(params.0)?)
    }

    /// Pause for a number of seconds
    #[tool(description = "Wait for the specified number of seconds (default 3)")]
    fn wait(&self, params: Parameters<WaitParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("wait", to_json(params.0)?)
    }

    /// Click an indexed element
    #[tool(description = "Click the interactive element with the given index from inspect_page")]
    fn click_element(
        &self,
        params: Parameters<ClickElementParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("click_element", to_json(params.0)?)
    }

    /// Type text into an indexed element
    #[tool(description = "Input text into the interactive element with the given index")]
    fn input_text(&self, params: Parameters<InputTextParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("input_text", to_json(params.0)?)
    }

    /// Switch to another tab
    #[tool(description = "Switch to the tab at the given position; -1 is the most recent tab")]
    fn switch_tab(&self, params: Parameters<SwitchTabParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("switch_tab", to_json(params.0)?)
    }

    /// Open a URL in a new tab
    #[tool(description = "Open a URL in a new tab and switch to it")]
    fn open_tab(&self, params: Parameters<OpenTabParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("open_tab", to_json(params.0)?)
    }

    /// Inspect the current page
    #[tool(description = "List interactive elements and extract content from the current page")]
    fn inspect_page(
        &self,
        params: Parameters<InspectPageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("inspect_page", to_json(params.0)?)
    }

    /// Scroll down
    #[tool(description = "Scroll down by the given number of pixels, or one page if omitted")]
    fn scroll_down(&self, params: Parameters<ScrollParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("scroll_down", to_json(params.0)?)
    }

    /// Scroll up
    #[tool(description = "Scroll up by the given number of pixels, or one page if omitted")]
    fn scroll_up(&self, params: Parameters<ScrollParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("scroll_up", to_json(params.0)?)
    }

    /// Send keyboard input
    #[tool(description = "Send keyboard keys or shortcuts to the current page, e.g. \"Escape\" or \"Enter\"")]
    fn send_keys(&self, params: Parameters<SendKeysParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("send_keys", to_json(params.0)?)
    }

    /// Scroll to text
    #[tool(description = "Scroll to the first visible element containing the specified text")]
    fn scroll_to_text(
        &self,
        params: Parameters<ScrollToTextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("scroll_to_text", to_json(params.0)?)
    }

    /// List dropdown options
    #[tool(description = "Get all options from the dropdown element with the given index")]
    fn get_dropdown_options(
        &self,
        params: Parameters<GetDropdownOptionsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("get_dropdown_options", to_json(params.0)?)
    }

    /// Select a dropdown option
    #[tool(description = "Select the dropdown option with the exact given text")]
    fn select_dropdown_option(
        &self,
        params: Parameters<SelectDropdownOptionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("select_dropdown_option", to_json(params.0)?)
    }

    /// Validate page content
    #[tool(description = "Extract the page as Markdown and optionally check it for expected text")]
    fn validate_page(
        &self,
        params: Parameters<ValidatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_tool("validate_page", to_json(params.0)?)
    }

    /// Capture a screenshot
    #[tool(description = "Take a PNG screenshot of the current page, base64-encoded")]
    fn screenshot(&self, params: Parameters<ScreenshotParams>) -> Result<CallToolResult, McpError> {
        self.call_tool("screenshot", to_json(params.0)?)
    }

    /// Complete the task
    #[tool(description = "Complete the task with a success flag and optional extracted text")]
    fn done(&self, params: Parameters<DoneParams>) -> Result<CallToolResult, McpError> {
        // Completion must work even when no browser session exists
        let payload = crate::tools::done::DoneTool::completion_payload(&params.0);
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_params_defaults() {
        let params: InitializeBrowserParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.headless.is_none());
        assert!(params.task.is_empty());
    }

    #[test]
    fn test_initialize_params_explicit() {
        let params: InitializeBrowserParams = serde_json::from_value(serde_json::json!({
            "headless": true,
            "task": "find the cheapest flight"
        }))
        .unwrap();
        assert_eq!(params.headless, Some(true));
        assert_eq!(params.task, "find the cheapest flight");
    }

    #[test]
    fn test_convert_result_message() {
        let result = InternalToolResult::message("🔙 Navigated back");
        let converted = convert_result(result).unwrap();
        assert_eq!(converted.is_error, Some(false));
    }

    #[test]
    fn test_convert_result_failure() {
        let result = InternalToolResult::failure("element vanished");
        assert!(convert_result(result).is_err());
    }
}
