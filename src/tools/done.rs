use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the done tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DoneParams {
    /// Whether the task succeeded (default: true)
    #[serde(default = "default_success")]
    pub success: bool,

    /// Content extracted while completing the task
    #[serde(default)]
    pub text: String,
}

fn default_success() -> bool {
    true
}

/// Tool the agent calls to mark its task complete; never touches the browser
#[derive(Default)]
pub struct DoneTool;

impl DoneTool {
    pub(crate) fn completion_payload(params: &DoneParams) -> serde_json::Value {
        serde_json::json!({
            "is_done": true,
            "success": params.success,
            "extracted_content": params.text
        })
    }
}

impl Tool for DoneTool {
    type Params = DoneParams;

    fn name(&self) -> &str {
        "done"
    }

    fn execute_typed(&self, params: DoneParams, _context: &mut ToolContext) -> Result<ToolResult> {
        Ok(ToolResult::success_with(Self::completion_payload(&params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_params_defaults() {
        let params: DoneParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(params.success);
        assert!(params.text.is_empty());
    }

    #[test]
    fn test_done_params_failure() {
        let params: DoneParams =
            serde_json::from_value(serde_json::json!({ "success": false, "text": "blocked by captcha" }))
                .unwrap();
        assert!(!params.success);
        assert_eq!(params.text, "blocked by captcha");
    }

    #[test]
    fn test_completion_payload_shape() {
        let payload = DoneTool::completion_payload(&DoneParams {
            success: true,
            text: "found it".to_string(),
        });

        assert_eq!(payload["is_done"], true);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["extracted_content"], "found it");
    }

    #[test]
    fn test_tool_metadata() {
        let tool = DoneTool;
        assert_eq!(tool.name(), "done");
        assert!(tool.parameters_schema().is_object());
    }
}
