use crate::browser::BrowserSession;
use crate::dom::ElementSelector;
use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use headless_chrome::{Element, Tab};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters for the click_element tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickElementParams {
    /// Index of the element to click, from the inspect_page listing
    pub index: usize,
}

/// Tool that clicks an indexed element
#[derive(Default)]
pub struct ClickElementTool;

/// Locate an element by its selector, preferring the `#id` CSS shortcut and
/// falling back to the position-based XPath
pub(crate) fn locate_element<'a>(
    session: &BrowserSession,
    tab: &'a Tab,
    selector: &ElementSelector,
) -> Result<Element<'a>> {
    if let Some(css) = &selector.css_selector {
        if let Ok(element) = session.find_element(tab, css) {
            return Ok(element);
        }
    }

    session.find_element_by_xpath(tab, &selector.xpath)
}

fn click_once(session: &BrowserSession, selector: &ElementSelector) -> Result<()> {
    let tab = session.tab()?;
    let element = locate_element(session, &tab, selector)?;

    element.click().map_err(|e| BrowserError::ToolExecutionFailed {
        tool: "click_element".to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

impl Tool for ClickElementTool {
    type Params = ClickElementParams;

    fn name(&self) -> &str {
        "click_element"
    }

    fn execute_typed(&self, params: ClickElementParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (selector, text, is_uploader) = {
            let dom = context.get_dom()?;

            let selector = dom.get_selector(params.index).cloned().ok_or_else(|| {
                BrowserError::ElementNotFound(format!(
                    "Element with index {} does not exist - retry or use alternative actions",
                    params.index
                ))
            })?;
            let node = dom.find_node_by_index(params.index);
            let text = node.map(|n| n.text_preview(2)).unwrap_or_default();
            let is_uploader = node.map_or(false, |n| n.is_file_uploader(2));

            (selector, text, is_uploader)
        };

        if is_uploader {
            return Ok(ToolResult::message(format!(
                "Index {} - has an element which opens file upload dialog. Use a dedicated function for file uploads",
                params.index
            )));
        }

        let tabs_before = context.session.tab_count()?;

        if let Err(e) = click_once(context.session, &selector) {
            let reason = e.to_string();

            if reason.contains("not found") || reason.contains("Failed to click") {
                // The element may have been mid-transition; give the page a
                // moment and try once more
                std::thread::sleep(Duration::from_secs(1));

                click_once(context.session, &selector).map_err(|retry_err| {
                    BrowserError::ToolExecutionFailed {
                        tool: "click_element".to_string(),
                        reason: format!(
                            "Failed to click element with index {} even after waiting: {}",
                            params.index, retry_err
                        ),
                    }
                })?;
            } else {
                return Ok(ToolResult::message(format!(
                    "Error clicking element with index {}: {}. Call inspect_page() and try finding the element again.",
                    params.index, reason
                )));
            }
        }

        context.invalidate_dom();

        let mut message = format!("🖱️ Clicked button with index {}: {}", params.index, text);

        if context.session.tab_count()? > tabs_before {
            message.push_str(" - New tab opened - switching to it");
            context.session.switch_to_tab(-1)?;
        }

        Ok(ToolResult::message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_params() {
        let json = serde_json::json!({ "index": 5 });

        let params: ClickElementParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.index, 5);
    }

    #[test]
    fn test_click_params_rejects_missing_index() {
        let result: std::result::Result<ClickElementParams, _> =
            serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ClickElementTool;
        assert_eq!(tool.name(), "click_element");
        assert!(tool.parameters_schema().is_object());
    }
}
