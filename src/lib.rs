//! # mcp-browser-use
//!
//! A Model Context Protocol (MCP) server that bridges AI agents to a web browser
//! driven via the Chrome DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **MCP Server**: tool surface for AI-driven browser automation (navigate,
//!   click, input, tabs, dropdowns, validation, screenshots)
//! - **Browser Session Management**: launch the user's default browser (Chrome,
//!   Brave, Edge) with existing login sessions, or a headless instance
//! - **DOM Extraction**: page structure with indexed interactive elements for
//!   AI-friendly targeting
//!
//! ## Running the MCP Server
//!
//! ```bash
//! # Stdio transport, attaching to the default browser when initialized
//! cargo run --bin mcp-browser-use
//!
//! # SSE transport on a port
//! cargo run --bin mcp-browser-use -- --transport sse --port 3000
//! ```
//!
//! An agent first calls the `initialize_browser` tool, then inspects pages with
//! `inspect_page` and acts on elements by index, and finally reports completion
//! with `done`.
//!
//! ## Library Usage (Advanced)
//!
//! For direct integration in Rust applications:
//!
//! ```rust,no_run
//! use mcp_browser_use::{BrowserSession, LaunchOptions};
//! use mcp_browser_use::tools::{ToolRegistry, ToolContext};
//! use serde_json::json;
//!
//! # fn main() -> mcp_browser_use::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&session);
//!
//! registry.execute("go_to_url", json!({"url": "https://example.com"}), &mut context)?;
//!
//! let dom = session.extract_dom()?;
//! println!("Found {} interactive elements", dom.count_interactive());
//!
//! registry.execute("click_element", json!({"index": 0}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: browser session management, configuration, default-browser detection
//! - [`dom`]: DOM extraction, element indexing, and tree representation
//! - [`tools`]: browser automation tools dispatched by the registry
//! - [`error`]: error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod browser;
pub mod dom;
pub mod error;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserKind, BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{BoundingBox, DomTree, ElementNode, ElementSelector, SelectorMap};
pub use error::{BrowserError, Result};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::BrowserServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
