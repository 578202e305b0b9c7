use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the get_dropdown_options tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetDropdownOptionsParams {
    /// Index of the dropdown element, from the inspect_page listing
    pub index: usize,
}

/// Parameters for the select_dropdown_option tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectDropdownOptionParams {
    /// Index of the dropdown element, from the inspect_page listing
    pub index: usize,

    /// The exact text of the option to select
    pub text: String,
}

/// One `<option>` of a `<select>` element
#[derive(Debug, Deserialize)]
struct DropdownOption {
    text: String,
    #[allow(dead_code)]
    value: String,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct DropdownInfo {
    options: Vec<DropdownOption>,
}

/// Documents searched for the XPath: the top document plus any same-origin
/// iframe documents the main world can reach
const COLLECT_DOCS_JS: &str = r#"
    function collectDocuments() {
        var docs = [document];
        var frames = document.querySelectorAll('iframe');
        for (var i = 0; i < frames.length; i++) {
            try {
                if (frames[i].contentDocument) {
                    docs.push(frames[i].contentDocument);
                }
            } catch (e) {
                // cross-origin frame
            }
        }
        return docs;
    }
"#;

fn dropdown_xpath(context: &mut ToolContext, index: usize, tool: &str) -> Result<(String, String)> {
    let dom = context.get_dom()?;

    let selector = dom.get_selector(index).ok_or_else(|| {
        BrowserError::ElementNotFound(format!(
            "Element with index {} does not exist - retry or use alternative actions",
            index
        ))
    })?;

    let xpath = serde_json::to_string(&selector.xpath)
        .map_err(|e| BrowserError::ToolExecutionFailed { tool: tool.to_string(), reason: e.to_string() })?;

    Ok((xpath, selector.tag_name.clone()))
}

/// Tool that lists the options of a `<select>` element
#[derive(Default)]
pub struct GetDropdownOptionsTool;

impl Tool for GetDropdownOptionsTool {
    type Params = GetDropdownOptionsParams;

    fn name(&self) -> &str {
        "get_dropdown_options"
    }

    fn execute_typed(&self, params: GetDropdownOptionsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (xpath, _) = dropdown_xpath(context, params.index, "get_dropdown_options")?;

        let script = format!(
            r#"(function() {{
                {COLLECT_DOCS_JS}
                var docs = collectDocuments();
                for (var d = 0; d < docs.length; d++) {{
                    var doc = docs[d];
                    var select = doc.evaluate({xpath}, doc, null,
                        XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                    if (!select || select.tagName.toLowerCase() !== 'select') {{
                        continue;
                    }}
                    var options = [];
                    for (var i = 0; i < select.options.length; i++) {{
                        options.push({{
                            text: select.options[i].text,
                            value: select.options[i].value,
                            index: select.options[i].index
                        }});
                    }}
                    return JSON.stringify({{ options: options }});
                }}
                return null;
            }})()"#
        );

        let value = context.session.evaluate(&script)?;

        let info: Option<DropdownInfo> = match value.as_ref().and_then(|v| v.as_str()) {
            Some(json_str) => serde_json::from_str(json_str).map_err(|e| BrowserError::ToolExecutionFailed {
                tool: "get_dropdown_options".to_string(),
                reason: format!("Failed to parse dropdown options: {}", e),
            })?,
            None => None,
        };

        match info {
            Some(info) if !info.options.is_empty() => {
                let mut lines: Vec<String> = info
                    .options
                    .iter()
                    .map(|opt| {
                        // JSON-encode the text so whitespace-significant options are unambiguous
                        format!("{}: text={}", opt.index, serde_json::json!(opt.text))
                    })
                    .collect();
                lines.push("Use the exact text string in select_dropdown_option".to_string());

                Ok(ToolResult::message(lines.join("\n")))
            }
            _ => Ok(ToolResult::message("No options found in any frame for dropdown")),
        }
    }
}

/// Tool that selects a `<select>` option by its exact text
#[derive(Default)]
pub struct SelectDropdownOptionTool;

impl Tool for SelectDropdownOptionTool {
    type Params = SelectDropdownOptionParams;

    fn name(&self) -> &str {
        "select_dropdown_option"
    }

    fn execute_typed(&self, params: SelectDropdownOptionParams, context: &mut ToolContext) -> Result<ToolResult> {
        let (xpath, tag_name) = dropdown_xpath(context, params.index, "select_dropdown_option")?;

        if tag_name != "select" {
            return Ok(ToolResult::message(format!(
                "Cannot select option: Element with index {} is a {}, not a select",
                params.index, tag_name
            )));
        }

        let wanted = serde_json::to_string(&params.text).map_err(|e| BrowserError::ToolExecutionFailed {
            tool: "select_dropdown_option".to_string(),
            reason: e.to_string(),
        })?;

        let script = format!(
            r#"(function() {{
                {COLLECT_DOCS_JS}
                var wanted = {wanted};
                var docs = collectDocuments();
                for (var d = 0; d < docs.length; d++) {{
                    var doc = docs[d];
                    var select = doc.evaluate({xpath}, doc, null,
                        XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;
                    if (!select || select.tagName.toLowerCase() !== 'select') {{
                        continue;
                    }}
                    for (var i = 0; i < select.options.length; i++) {{
                        if (select.options[i].text.trim() === wanted.trim()) {{
                            select.selectedIndex = i;
                            select.dispatchEvent(new Event('input', {{ bubbles: true }}));
                            select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                            return JSON.stringify({{ value: select.options[i].value }});
                        }}
                    }}
                }}
                return null;
            }})()"#
        );

        let value = context.session.evaluate(&script)?;

        match value.as_ref().and_then(|v| v.as_str()) {
            Some(json_str) => {
                let selected: serde_json::Value =
                    serde_json::from_str(json_str).map_err(|e| BrowserError::ToolExecutionFailed {
                        tool: "select_dropdown_option".to_string(),
                        reason: format!("Failed to parse selection result: {}", e),
                    })?;
                let selected_value = selected.get("value").and_then(|v| v.as_str()).unwrap_or_default();

                context.invalidate_dom();

                Ok(ToolResult::message(format!(
                    "Selected option {} with value {}",
                    params.text, selected_value
                )))
            }
            None => Ok(ToolResult::message(format!(
                "Could not select option '{}' in any frame",
                params.text
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_options_params() {
        let params: GetDropdownOptionsParams =
            serde_json::from_value(serde_json::json!({ "index": 4 })).unwrap();
        assert_eq!(params.index, 4);
    }

    #[test]
    fn test_select_option_params() {
        let params: SelectDropdownOptionParams =
            serde_json::from_value(serde_json::json!({ "index": 4, "text": "Large" })).unwrap();
        assert_eq!(params.index, 4);
        assert_eq!(params.text, "Large");
    }

    #[test]
    fn test_option_line_formatting() {
        // Option text is JSON-encoded in the listing
        let line = format!("{}: text={}", 2, serde_json::json!("  Spaced  "));
        assert_eq!(line, "2: text=\"  Spaced  \"");
    }

    #[test]
    fn test_dropdown_info_deserialization() {
        let json = r#"{"options": [{"text": "Small", "value": "s", "index": 0}]}"#;
        let info: DropdownInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.options.len(), 1);
        assert_eq!(info.options[0].text, "Small");
        assert_eq!(info.options[0].index, 0);
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(GetDropdownOptionsTool.name(), "get_dropdown_options");
        assert_eq!(SelectDropdownOptionTool.name(), "select_dropdown_option");
    }
}
