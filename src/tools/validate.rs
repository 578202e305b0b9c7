use crate::error::Result;
use crate::tools::utils::truncate_chars;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the validate_page tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidatePageParams {
    /// Text expected to be present on the page; when empty, the extracted
    /// content is returned instead of checked
    #[serde(default)]
    pub expected_text: String,
}

/// Tool that converts the page to Markdown and optionally checks it for
/// expected text
#[derive(Default)]
pub struct ValidatePageTool;

impl Tool for ValidatePageTool {
    type Params = ValidatePageParams;

    fn name(&self) -> &str {
        "validate_page"
    }

    fn execute_typed(&self, params: ValidatePageParams, context: &mut ToolContext) -> Result<ToolResult> {
        let html = context.session.page_content()?;
        let content = html2md::parse_html(&html);

        let message = if !params.expected_text.is_empty() {
            if content.to_lowercase().contains(&params.expected_text.to_lowercase()) {
                format!(
                    "✅ Validation successful: Expected text '{}' found on page.",
                    params.expected_text
                )
            } else {
                format!(
                    "⚠ Validation warning: Expected text '{}' not found. Extracted snippet: {}",
                    params.expected_text,
                    truncate_chars(&content, 200)
                )
            }
        } else {
            format!("Page content extracted:\n{}", truncate_chars(&content, 500))
        };

        Ok(ToolResult::message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_params_default() {
        let params: ValidatePageParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.expected_text.is_empty());
    }

    #[test]
    fn test_validate_params_with_text() {
        let params: ValidatePageParams =
            serde_json::from_value(serde_json::json!({ "expected_text": "Order confirmed" })).unwrap();
        assert_eq!(params.expected_text, "Order confirmed");
    }

    #[test]
    fn test_html_to_markdown_conversion() {
        let markdown = html2md::parse_html("<h1>Title</h1><p>Some <strong>bold</strong> text</p>");
        assert!(markdown.contains("Title"));
        assert!(markdown.contains("**bold**"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ValidatePageTool;
        assert_eq!(tool.name(), "validate_page");
        assert!(tool.parameters_schema().is_object());
    }
}
