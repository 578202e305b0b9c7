use crate::error::{BrowserError, Result};
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the open_tab tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenTabParams {
    /// The URL to open in the new tab
    pub url: String,
}

/// Tool that opens a URL in a new tab and switches to it
#[derive(Default)]
pub struct OpenTabTool;

impl Tool for OpenTabTool {
    type Params = OpenTabParams;

    fn name(&self) -> &str {
        "open_tab"
    }

    fn execute_typed(&self, params: OpenTabParams, context: &mut ToolContext) -> Result<ToolResult> {
        let normalized_url = normalize_url(&params.url);

        let tab = context.session.new_tab()?;

        tab.navigate_to(&normalized_url).map_err(|e| {
            BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", normalized_url, e))
        })?;

        tab.wait_until_navigated().map_err(|e| {
            BrowserError::NavigationFailed(format!("Navigation to {} did not complete: {}", normalized_url, e))
        })?;

        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔗 Opened new tab with {}", normalized_url)))
    }
}

/// Parameters for the switch_tab tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwitchTabParams {
    /// Position of the tab to switch to; negative values count from the end
    /// (-1 is the most recently opened tab)
    pub page_id: isize,
}

/// Tool that switches the current tab
#[derive(Default)]
pub struct SwitchTabTool;

impl Tool for SwitchTabTool {
    type Params = SwitchTabParams;

    fn name(&self) -> &str {
        "switch_tab"
    }

    fn execute_typed(&self, params: SwitchTabParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tab = context.session.switch_to_tab(params.page_id)?;

        tab.wait_until_navigated().ok(); // A still-loading tab is fine to switch to

        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔄 Switched to tab {}", params.page_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_tab_params() {
        let json = serde_json::json!({ "url": "example.com" });

        let params: OpenTabParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.url, "example.com");
    }

    #[test]
    fn test_switch_tab_params() {
        let json = serde_json::json!({ "page_id": -1 });

        let params: SwitchTabParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.page_id, -1);
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(OpenTabTool.name(), "open_tab");
        assert_eq!(SwitchTabTool.name(), "switch_tab");
        assert!(OpenTabTool.parameters_schema().is_object());
        assert!(SwitchTabTool.parameters_schema().is_object());
    }
}
