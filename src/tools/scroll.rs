use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the scroll_down / scroll_up tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrollParams {
    /// Pixels to scroll; scrolls one viewport height when omitted
    #[serde(default)]
    pub amount: Option<i64>,
}

fn amount_label(amount: Option<i64>) -> String {
    match amount {
        Some(pixels) => format!("{} pixels", pixels),
        None => "one page".to_string(),
    }
}

/// Tool that scrolls the page down
#[derive(Default)]
pub struct ScrollDownTool;

impl Tool for ScrollDownTool {
    type Params = ScrollParams;

    fn name(&self) -> &str {
        "scroll_down"
    }

    fn execute_typed(&self, params: ScrollParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.scroll_by(params.amount, 1)?;
        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔍 Scrolled down the page by {}", amount_label(params.amount))))
    }
}

/// Tool that scrolls the page up
#[derive(Default)]
pub struct ScrollUpTool;

impl Tool for ScrollUpTool {
    type Params = ScrollParams;

    fn name(&self) -> &str {
        "scroll_up"
    }

    fn execute_typed(&self, params: ScrollParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.scroll_by(params.amount, -1)?;
        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔍 Scrolled up the page by {}", amount_label(params.amount))))
    }
}

/// Parameters for the scroll_to_text tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScrollToTextParams {
    /// The text to find and scroll to
    pub text: String,
}

/// Tool that scrolls the first visible element containing the given text into view
#[derive(Default)]
pub struct ScrollToTextTool;

impl Tool for ScrollToTextTool {
    type Params = ScrollToTextParams;

    fn name(&self) -> &str {
        "scroll_to_text"
    }

    fn execute_typed(&self, params: ScrollToTextParams, context: &mut ToolContext) -> Result<ToolResult> {
        // Quote the needle as a JS string literal so arbitrary text is safe
        let needle = serde_json::to_string(&params.text)
            .map_err(|e| BrowserError::InvalidParams(e.to_string()))?;

        let script = format!(
            r#"(function() {{
                var needle = {needle};
                var walker = document.createTreeWalker(document.body, NodeFilter.SHOW_TEXT);
                var node;
                while ((node = walker.nextNode())) {{
                    if (node.textContent.indexOf(needle) === -1) {{
                        continue;
                    }}
                    var el = node.parentElement;
                    if (!el) {{
                        continue;
                    }}
                    var rect = el.getBoundingClientRect();
                    var style = window.getComputedStyle(el);
                    if (rect.width <= 0 || rect.height <= 0 ||
                        style.display === 'none' || style.visibility === 'hidden') {{
                        continue;
                    }}
                    el.scrollIntoView({{ block: 'center' }});
                    return true;
                }}
                return false;
            }})()"#
        );

        let found = context
            .session
            .evaluate(&script)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if found {
            // Let the smooth-scroll settle before the agent inspects the page
            std::thread::sleep(std::time::Duration::from_millis(500));
            context.invalidate_dom();
            Ok(ToolResult::message(format!("🔍 Scrolled to text: {}", params.text)))
        } else {
            Ok(ToolResult::message(format!("Text '{}' not found or not visible on page", params.text)))
        }
    }
}
