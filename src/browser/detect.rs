//! Default-browser detection
//!
//! Finds the user's default browser so `initialize_browser` can attach to it
//! with existing login sessions. Edge is treated as Chrome downstream since
//! both speak CDP the same way.

use std::path::PathBuf;
#[cfg(any(target_os = "linux", target_os = "macos"))]
use std::process::Command;

/// Chromium-family browsers the server knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Brave,
    Edge,
    Chromium,
}

impl BrowserKind {
    /// Human-readable name for status messages
    pub fn label(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Brave => "Brave",
            BrowserKind::Edge => "Edge",
            BrowserKind::Chromium => "Chromium",
        }
    }
}

/// Detect the user's default browser and, where possible, its executable path.
///
/// Falls back to Chrome with no path when detection fails; callers should
/// then consult [`fallback_path`] or let headless_chrome probe for a binary.
pub fn detect_default_browser() -> (BrowserKind, Option<PathBuf>) {
    match platform_detect() {
        Some(found) => found,
        None => {
            log::info!("Could not detect default browser, falling back to Chrome");
            (BrowserKind::Chrome, None)
        }
    }
}

/// First existing well-known install path for the given browser on this OS
pub fn fallback_path(kind: BrowserKind) -> Option<PathBuf> {
    known_paths(kind).into_iter().find(|p| p.exists())
}

/// Check whether any usable browser binary can be found on this system
pub fn browser_available() -> bool {
    let (kind, path) = detect_default_browser();
    if path.map_or(false, |p| p.exists()) || fallback_path(kind).is_some() {
        return true;
    }
    // Last resort: headless_chrome's own executable probing
    headless_chrome::browser::default_executable().is_ok()
}

#[cfg(target_os = "linux")]
fn platform_detect() -> Option<(BrowserKind, Option<PathBuf>)> {
    let output = Command::new("xdg-settings")
        .args(["get", "default-web-browser"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let desktop_entry = String::from_utf8_lossy(&output.stdout).trim().to_lowercase();
    let kind = if desktop_entry.contains("brave") {
        BrowserKind::Brave
    } else if desktop_entry.contains("chrome") {
        BrowserKind::Chrome
    } else if desktop_entry.contains("chromium") {
        BrowserKind::Chromium
    } else if desktop_entry.contains("edge") {
        BrowserKind::Edge
    } else {
        return None;
    };

    log::info!("Auto-detected browser: {}", kind.label());
    Some((kind, fallback_path(kind)))
}

#[cfg(target_os = "macos")]
fn platform_detect() -> Option<(BrowserKind, Option<PathBuf>)> {
    // LaunchServices stores the HTTP handler among its LSHandlers entries
    let output = Command::new("defaults")
        .args([
            "read",
            "com.apple.LaunchServices/com.apple.launchservices.secure",
            "LSHandlers",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let handlers = String::from_utf8_lossy(&output.stdout).to_lowercase();
    let kind = if handlers.contains("com.brave.browser") {
        BrowserKind::Brave
    } else if handlers.contains("com.google.chrome") {
        BrowserKind::Chrome
    } else if handlers.contains("com.microsoft.edgemac") {
        BrowserKind::Edge
    } else {
        return None;
    };

    log::info!("Auto-detected browser: {}", kind.label());
    Some((kind, fallback_path(kind)))
}

#[cfg(target_os = "windows")]
fn platform_detect() -> Option<(BrowserKind, Option<PathBuf>)> {
    // Registry access would need an extra crate; probing the standard
    // install locations covers the browsers we support.
    for kind in [BrowserKind::Brave, BrowserKind::Chrome, BrowserKind::Edge] {
        if let Some(path) = fallback_path(kind) {
            log::info!("Auto-detected browser: {}", kind.label());
            return Some((kind, Some(path)));
        }
    }
    None
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_detect() -> Option<(BrowserKind, Option<PathBuf>)> {
    None
}

#[cfg(target_os = "linux")]
fn known_paths(kind: BrowserKind) -> Vec<PathBuf> {
    let paths: &[&str] = match kind {
        BrowserKind::Brave => &["/usr/bin/brave-browser", "/usr/bin/brave"],
        BrowserKind::Chrome => &["/usr/bin/google-chrome", "/usr/bin/google-chrome-stable"],
        BrowserKind::Chromium => &["/usr/bin/chromium-browser", "/usr/bin/chromium"],
        BrowserKind::Edge => &["/usr/bin/microsoft-edge", "/usr/bin/microsoft-edge-stable"],
    };
    paths.iter().map(PathBuf::from).collect()
}

#[cfg(target_os = "macos")]
fn known_paths(kind: BrowserKind) -> Vec<PathBuf> {
    let paths: &[&str] = match kind {
        BrowserKind::Brave => &["/Applications/Brave Browser.app/Contents/MacOS/Brave Browser"],
        BrowserKind::Chrome => &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"],
        BrowserKind::Chromium => &["/Applications/Chromium.app/Contents/MacOS/Chromium"],
        BrowserKind::Edge => &["/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge"],
    };
    paths.iter().map(PathBuf::from).collect()
}

#[cfg(target_os = "windows")]
fn known_paths(kind: BrowserKind) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let local_app_data = std::env::var("LOCALAPPDATA").ok();

    match kind {
        BrowserKind::Brave => {
            if let Some(ref base) = local_app_data {
                paths.push(PathBuf::from(base).join("BraveSoftware/Brave-Browser/Application/brave.exe"));
            }
            paths.push(PathBuf::from("C:\\Program Files\\BraveSoftware\\Brave-Browser\\Application\\brave.exe"));
            paths.push(PathBuf::from("C:\\Program Files (x86)\\BraveSoftware\\Brave-Browser\\Application\\brave.exe"));
        }
        BrowserKind::Chrome | BrowserKind::Chromium => {
            paths.push(PathBuf::from("C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe"));
            paths.push(PathBuf::from("C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe"));
        }
        BrowserKind::Edge => {
            paths.push(PathBuf::from("C:\\Program Files (x86)\\Microsoft\\Edge\\Application\\msedge.exe"));
            paths.push(PathBuf::from("C:\\Program Files\\Microsoft\\Edge\\Application\\msedge.exe"));
        }
    }
    paths
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn known_paths(_kind: BrowserKind) -> Vec<PathBuf> {
    Vec::new()
}
