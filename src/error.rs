use thiserror::Error;

/// Errors produced by browser automation operations
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch a browser process
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to a remote browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab creation, activation, or teardown failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation did not complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// No element matched the given selector or index
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// DOM extraction returned malformed data
    #[error("Failed to parse DOM: {0}")]
    DomParseFailed(String),

    /// JavaScript evaluation failed in the page
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A tool ran but could not complete its action
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    /// A browser tool was called before `initialize_browser`
    #[error("Browser not initialized - call initialize_browser first")]
    NotInitialized,

    /// No tool registered under the given name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool parameters did not match the expected schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, BrowserError>;
