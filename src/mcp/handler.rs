//! Server handler owning the browser session lifecycle

use crate::browser::{detect_default_browser, fallback_path, BrowserSession, ConnectionOptions, LaunchOptions};
use crate::error::BrowserError;
use crate::mcp::convert_result;
use crate::tools::{ToolContext, ToolRegistry};
use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
    ErrorData as McpError,
    ServerHandler,
};
use std::sync::Mutex;

/// Action names advertised in the system prompt returned by initialize_browser
const AVAILABLE_ACTIONS: &str = "initialize_browser, close_browser, search_google, go_to_url, \
     go_back, wait, click_element, input_text, switch_tab, open_tab, inspect_page, scroll_down, \
     scroll_up, send_keys, scroll_to_text, get_dropdown_options, select_dropdown_option, \
     validate_page, screenshot, done";

/// MCP server exposing browser automation tools
///
/// The session starts out absent; `initialize_browser` creates it and
/// `close_browser` tears it down. All other browser tools go through
/// [`BrowserServer::call_tool`], which fails cleanly when no session exists.
pub struct BrowserServer {
    /// Launch configuration applied when a session is created
    launch_options: LaunchOptions,

    /// When set, sessions connect to this remote browser instead of launching one
    connection: Option<ConnectionOptions>,

    /// The managed browser session, if any
    session: Mutex<Option<BrowserSession>>,

    /// Registry the MCP tool methods dispatch into
    registry: ToolRegistry,

    tool_router: ToolRouter<Self>,
}

impl BrowserServer {
    /// Create a server with default launch options
    pub fn new() -> crate::error::Result<Self> {
        Self::with_options(LaunchOptions::default())
    }

    /// Create a server with the given launch options
    pub fn with_options(options: LaunchOptions) -> crate::error::Result<Self> {
        Ok(Self {
            launch_options: options,
            connection: None,
            session: Mutex::new(None),
            registry: ToolRegistry::with_defaults(),
            tool_router: Self::tool_router(),
        })
    }

    /// Create a server that attaches to an already-running browser over WebSocket
    pub fn with_connection(options: ConnectionOptions) -> crate::error::Result<Self> {
        Ok(Self {
            launch_options: LaunchOptions::default(),
            connection: Some(options),
            session: Mutex::new(None),
            registry: ToolRegistry::with_defaults(),
            tool_router: Self::tool_router(),
        })
    }

    /// Whether a browser session currently exists
    pub fn has_session(&self) -> bool {
        self.session.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Launch (or relaunch) the browser session and return the system prompt
    /// for the agent.
    pub(crate) fn open_session(&self, headless: Option<bool>, task: &str) -> Result<String, McpError> {
        let mut guard = self.session.lock().unwrap_or_else(|e| e.into_inner());

        // A lingering session would hold the profile lock
        if let Some(old) = guard.take() {
            let _ = old.close();
        }

        if let Some(conn) = &self.connection {
            log::info!("Connecting to remote browser at {}", conn.ws_url);

            let session = BrowserSession::connect(conn.clone())
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            *guard = Some(session);

            return Ok(build_system_prompt(
                task,
                &format!("Connected to remote browser at {}", conn.ws_url),
            ));
        }

        let (kind, detected_path) = detect_default_browser();

        let mut options = self.launch_options.clone();
        options.headless = headless.unwrap_or(options.headless);
        if options.chrome_path.is_none() {
            options.chrome_path = detected_path.or_else(|| fallback_path(kind));
        }

        log::info!(
            "Connecting to user's {} browser at: {}",
            kind.label(),
            options
                .chrome_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<auto>".to_string())
        );

        let session =
            BrowserSession::launch(options).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        *guard = Some(session);

        Ok(build_system_prompt(
            task,
            &format!("Connected to user's {} browser with existing sessions", kind.label()),
        ))
    }

    /// Tear down the browser session, if one exists
    pub(crate) fn close_session(&self) {
        let mut guard = self.session.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(session) = guard.take() {
            let _ = session.close();
        }
    }

    /// Run a registry tool against the current session
    pub(crate) fn call_tool(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        let guard = self.session.lock().unwrap_or_else(|e| e.into_inner());

        let session = guard
            .as_ref()
            .ok_or_else(|| McpError::internal_error(BrowserError::NotInitialized.to_string(), None))?;

        let mut context = ToolContext::new(session);

        let result = self
            .registry
            .execute(name, params, &mut context)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }
}

impl Drop for BrowserServer {
    fn drop(&mut self) {
        self.close_session();
    }
}

fn build_system_prompt(task: &str, browser_mode: &str) -> String {
    format!(
        "You are an autonomous agent operating a web browser through the available actions.\n\
         Available actions: {AVAILABLE_ACTIONS}\n\
         Use inspect_page to see the current page and its indexed interactive elements, then act \
         on elements by index.\n\
         Your ultimate task is: {task}.\n\
         If you achieved your ultimate task, stop everything and use the done tool to complete \
         the task.\n\
         If not, continue as usual.\n\n\
         Browser mode: {browser_mode}\n\
         Note: Connected to your default browser with all existing login sessions and data."
    )
}

#[tool_handler]
impl ServerHandler for BrowserServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Browser automation server. Call initialize_browser before any other browser \
                 tool; use inspect_page to discover interactive elements and act on them by index."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_starts_without_session() {
        let server = BrowserServer::new().expect("Failed to create server");
        assert!(!server.has_session());
    }

    #[test]
    fn test_call_tool_without_session_fails() {
        let server = BrowserServer::new().expect("Failed to create server");

        let result = server.call_tool("go_back", serde_json::json!({}));
        assert!(result.is_err());

        let message = result.unwrap_err().message;
        assert!(message.contains("initialize_browser"), "unexpected error: {}", message);
    }

    #[test]
    fn test_system_prompt_contents() {
        let prompt =
            build_system_prompt("buy a stapler", "Connected to user's Brave browser with existing sessions");

        assert!(prompt.contains("Your ultimate task is: buy a stapler."));
        assert!(prompt.contains("Connected to user's Brave browser with existing sessions"));
        assert!(prompt.contains("click_element"));
        assert!(prompt.contains("done"));
    }

    #[test]
    fn test_with_connection_starts_without_session() {
        let server = BrowserServer::with_connection(ConnectionOptions::new("ws://localhost:9222"))
            .expect("Failed to create server");
        assert!(!server.has_session());
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let server = BrowserServer::new().expect("Failed to create server");
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
