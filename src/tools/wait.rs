use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the wait tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WaitParams {
    /// Number of seconds to wait (default: 3)
    #[serde(default = "default_seconds")]
    pub seconds: u64,
}

fn default_seconds() -> u64 {
    3
}

/// Tool that pauses for a number of seconds
#[derive(Default)]
pub struct WaitTool;

impl Tool for WaitTool {
    type Params = WaitParams;

    fn name(&self) -> &str {
        "wait"
    }

    fn execute_typed(&self, params: WaitParams, context: &mut ToolContext) -> Result<ToolResult> {
        std::thread::sleep(Duration::from_secs(params.seconds));
        context.invalidate_dom();

        Ok(ToolResult::message(format!("🕒 Waiting for {} seconds", params.seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_params_default() {
        let params: WaitParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.seconds, 3);
    }

    #[test]
    fn test_wait_params_explicit() {
        let params: WaitParams = serde_json::from_value(serde_json::json!({ "seconds": 10 })).unwrap();
        assert_eq!(params.seconds, 10);
    }

    #[test]
    fn test_tool_metadata() {
        let tool = WaitTool;
        assert_eq!(tool.name(), "wait");
        assert!(tool.parameters_schema().is_object());
    }
}
