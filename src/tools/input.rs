use crate::error::{BrowserError, Result};
use crate::tools::click::locate_element;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the input_text tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputTextParams {
    /// Index of the element to type into, from the inspect_page listing
    pub index: usize,

    /// The text to input
    pub text: String,

    /// Whether the text is sensitive data; suppresses it in the reply (default: false)
    #[serde(default)]
    pub has_sensitive_data: bool,
}

/// Tool that types text into an indexed element
#[derive(Default)]
pub struct InputTextTool;

impl Tool for InputTextTool {
    type Params = InputTextParams;

    fn name(&self) -> &str {
        "input_text"
    }

    fn execute_typed(&self, params: InputTextParams, context: &mut ToolContext) -> Result<ToolResult> {
        let selector = {
            let dom = context.get_dom()?;

            dom.get_selector(params.index).cloned().ok_or_else(|| {
                BrowserError::ElementNotFound(format!(
                    "Element index {} does not exist - retry or use alternative actions",
                    params.index
                ))
            })?
        };

        let tab = context.session.tab()?;
        let element = locate_element(context.session, &tab, &selector)?;

        // Focus before typing so keystrokes land in the element
        element.click().ok();
        element.type_into(&params.text).map_err(|e| BrowserError::ToolExecutionFailed {
            tool: "input_text".to_string(),
            reason: e.to_string(),
        })?;

        let message = if params.has_sensitive_data {
            format!("⌨️ Input sensitive data into index {}", params.index)
        } else {
            format!("⌨️ Input {} into index {}", params.text, params.index)
        };

        Ok(ToolResult::message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_params_defaults() {
        let json = serde_json::json!({
            "index": 3,
            "text": "hello"
        });

        let params: InputTextParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.index, 3);
        assert_eq!(params.text, "hello");
        assert!(!params.has_sensitive_data);
    }

    #[test]
    fn test_input_params_sensitive() {
        let json = serde_json::json!({
            "index": 3,
            "text": "s3cret",
            "has_sensitive_data": true
        });

        let params: InputTextParams = serde_json::from_value(json).unwrap();
        assert!(params.has_sensitive_data);
    }

    #[test]
    fn test_tool_metadata() {
        let tool = InputTextTool;
        assert_eq!(tool.name(), "input_text");
        assert!(tool.parameters_schema().is_object());
    }
}
