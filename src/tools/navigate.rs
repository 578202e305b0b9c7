use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the search_google tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchGoogleParams {
    /// The search query to use in Google
    pub query: String,
}

/// Tool that searches Google in the current tab
#[derive(Default)]
pub struct SearchGoogleTool;

impl Tool for SearchGoogleTool {
    type Params = SearchGoogleParams;

    fn name(&self) -> &str {
        "search_google"
    }

    fn execute_typed(&self, params: SearchGoogleParams, context: &mut ToolContext) -> Result<ToolResult> {
        // udm=14 asks for the plain web results view
        let url = format!("https://www.google.com/search?q={}&udm=14", urlencoding::encode(&params.query));

        context.session.navigate(&url)?;
        context.session.wait_for_navigation()?;
        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔍 Searched for \"{}\" in Google", params.query)))
    }
}

/// Parameters for the go_to_url tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GoToUrlParams {
    /// The URL to navigate to
    pub url: String,
}

/// Tool that navigates the current tab to a URL
#[derive(Default)]
pub struct GoToUrlTool;

impl Tool for GoToUrlTool {
    type Params = GoToUrlParams;

    fn name(&self) -> &str {
        "go_to_url"
    }

    fn execute_typed(&self, params: GoToUrlParams, context: &mut ToolContext) -> Result<ToolResult> {
        let normalized_url = normalize_url(&params.url);

        context.session.navigate(&normalized_url)?;
        context.session.wait_for_navigation()?;
        context.invalidate_dom();

        Ok(ToolResult::message(format!("🔗 Navigated to {}", normalized_url)))
    }
}

/// Parameters for the go_back tool (none)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GoBackParams {}

/// Tool that navigates back in browser history
#[derive(Default)]
pub struct GoBackTool;

impl Tool for GoBackTool {
    type Params = GoBackParams;

    fn name(&self) -> &str {
        "go_back"
    }

    fn execute_typed(&self, _params: GoBackParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.go_back()?;
        context.invalidate_dom();

        Ok(ToolResult::message("🔙 Navigated back"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_google_params() {
        let json = serde_json::json!({ "query": "rust cdp automation" });

        let params: SearchGoogleParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.query, "rust cdp automation");
    }

    #[test]
    fn test_go_to_url_params() {
        let json = serde_json::json!({ "url": "https://example.com" });

        let params: GoToUrlParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.url, "https://example.com");
    }

    #[test]
    fn test_go_back_params_empty() {
        let params: GoBackParams = serde_json::from_value(serde_json::json!({})).unwrap();
        let _ = params;
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(SearchGoogleTool.name(), "search_google");
        assert_eq!(GoToUrlTool.name(), "go_to_url");
        assert_eq!(GoBackTool.name(), "go_back");

        assert!(SearchGoogleTool.parameters_schema().is_object());
        assert!(GoToUrlTool.parameters_schema().is_object());
    }

    #[test]
    fn test_search_url_encoding() {
        let encoded = urlencoding::encode("a&b c");
        assert_eq!(encoded, "a%26b%20c");
    }
}
