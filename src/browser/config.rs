use std::path::PathBuf;

/// Options for launching a new browser instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    /// Viewport width in pixels
    pub window_width: u32,

    /// Viewport height in pixels
    pub window_height: u32,

    /// Path to the browser executable (auto-detected if None)
    pub chrome_path: Option<PathBuf>,

    /// Profile directory; launching with the user's own profile keeps
    /// existing login sessions available
    pub user_data_dir: Option<PathBuf>,

    /// Run the browser sandboxed
    pub sandbox: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 900,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set the browser executable path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set the profile directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Populate options from environment variables, falling back to defaults.
    ///
    /// Recognized variables: `BROWSER_HEADLESS`, `BROWSER_WINDOW_WIDTH`,
    /// `BROWSER_WINDOW_HEIGHT`, `CHROME_PATH`, `BROWSER_USER_DATA_DIR`,
    /// `BROWSER_NO_SANDBOX`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            headless: std::env::var("BROWSER_HEADLESS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(defaults.headless),
            window_width: std::env::var("BROWSER_WINDOW_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.window_width),
            window_height: std::env::var("BROWSER_WINDOW_HEIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.window_height),
            chrome_path: std::env::var("CHROME_PATH").ok().map(PathBuf::from),
            user_data_dir: std::env::var("BROWSER_USER_DATA_DIR").ok().map(PathBuf::from),
            sandbox: std::env::var("BROWSER_NO_SANDBOX")
                .map(|s| s == "false" || s == "0")
                .unwrap_or(defaults.sandbox),
        }
    }
}

/// Options for connecting to an already-running browser over WebSocket
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// DevTools WebSocket URL, e.g. `ws://localhost:9222/devtools/browser/<id>`
    pub ws_url: String,

    /// Connection timeout in milliseconds
    pub timeout: u64,
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self { ws_url: ws_url.into(), timeout: 30_000 }
    }

    /// Builder method: set the connection timeout
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = timeout_ms;
        self
    }
}
