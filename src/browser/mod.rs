//! Browser session management and configuration
//!
//! This module owns the lifecycle of the driven browser: launching or
//! connecting to a Chrome/Chromium-family instance, tab bookkeeping, and
//! detection of the user's default browser.

pub mod config;
pub mod detect;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use detect::{browser_available, detect_default_browser, fallback_path, BrowserKind};
pub use session::BrowserSession;
