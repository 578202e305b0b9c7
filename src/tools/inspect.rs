use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the inspect_page tool (none)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InspectPageParams {}

/// Tool that reports the current page state: URL, open tabs, scroll position,
/// and the indexed interactive-element listing
#[derive(Default)]
pub struct InspectPageTool;

impl Tool for InspectPageTool {
    type Params = InspectPageParams;

    fn name(&self) -> &str {
        "inspect_page"
    }

    fn execute_typed(&self, _params: InspectPageParams, context: &mut ToolContext) -> Result<ToolResult> {
        let url = context.session.current_url()?;

        let mut tab_lines = Vec::new();
        for (position, tab) in context.session.get_tabs()?.iter().enumerate() {
            let title = tab.get_title().unwrap_or_default();
            tab_lines.push(format!("{}: {} - {}", position, tab.get_url(), title));
        }

        let (pixels_above, pixels_below) = context.session.scroll_position().unwrap_or((0, 0));

        // Extract fresh state rather than reusing a cached tree
        context.invalidate_dom();
        let listing = context.get_dom()?.to_prompt_string();

        let mut report = String::new();
        report.push_str(&format!("Current url: {}\n", url));
        report.push_str("Available tabs:\n");
        report.push_str(&tab_lines.join("\n"));
        report.push('\n');

        if pixels_above > 0 {
            report.push_str(&format!("... {} pixels above - scroll up to see more ...\n", pixels_above));
        }

        report.push_str("Interactive elements from current page:\n");
        report.push_str(&listing);
        report.push('\n');

        if pixels_below > 0 {
            report.push_str(&format!("... {} pixels below - scroll down to see more ...\n", pixels_below));
        }

        Ok(ToolResult::message(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_params_empty() {
        let params: InspectPageParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let _ = params;
    }

    #[test]
    fn test_tool_metadata() {
        let tool = InspectPageTool;
        assert_eq!(tool.name(), "inspect_page");
        assert!(tool.parameters_schema().is_object());
    }
}
