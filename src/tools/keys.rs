use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the send_keys tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendKeysParams {
    /// Keys to send, e.g. "Escape", "Enter", or plain text
    pub keys: String,
}

/// Tool that sends keyboard input to the current page
#[derive(Default)]
pub struct SendKeysTool;

impl Tool for SendKeysTool {
    type Params = SendKeysParams;

    fn name(&self) -> &str {
        "send_keys"
    }

    fn execute_typed(&self, params: SendKeysParams, context: &mut ToolContext) -> Result<ToolResult> {
        if let Err(e) = context.session.press_key(&params.keys) {
            // Not a named key; type it out character by character
            log::debug!("press_key('{}') failed ({}), falling back to per-character input", params.keys, e);

            for ch in params.keys.chars() {
                context.session.press_key(&ch.to_string())?;
            }
        }

        context.invalidate_dom();

        Ok(ToolResult::message(format!("⌨️ Sent keys: {}", params.keys)))
    }
}
