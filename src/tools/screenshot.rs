use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the screenshot tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotParams {
    /// Capture the full page instead of the viewport (default: false)
    #[serde(default)]
    pub full_page: bool,
}

/// Tool that captures a PNG screenshot of the current page
#[derive(Default)]
pub struct ScreenshotTool;

impl Tool for ScreenshotTool {
    type Params = ScreenshotParams;

    fn name(&self) -> &str {
        "screenshot"
    }

    fn execute_typed(&self, params: ScreenshotParams, context: &mut ToolContext) -> Result<ToolResult> {
        let png = context.session.screenshot(params.full_page)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&png);

        Ok(ToolResult::success_with(serde_json::json!({
            "format": "png",
            "full_page": params.full_page,
            "data": encoded
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_params_default() {
        let params: ScreenshotParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!params.full_page);
    }

    #[test]
    fn test_screenshot_params_full_page() {
        let params: ScreenshotParams =
            serde_json::from_value(serde_json::json!({ "full_page": true })).unwrap();
        assert!(params.full_page);
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ScreenshotTool;
        assert_eq!(tool.name(), "screenshot");
        assert!(tool.parameters_schema().is_object());
    }
}
