use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            dom::DomTree,
            error::{BrowserError, Result}};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, Element, Tab};
use std::{ffi::OsStr, sync::Arc, sync::Mutex, time::Duration};

/// Browser session that manages a Chrome/Chromium-family instance
///
/// Tracks the agent's current tab explicitly: `switch_to_tab` and `new_tab`
/// record which tab later operations act on, instead of re-deriving it from
/// focus state on every call.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Index of the tab the agent is working in, in `get_tabs` order
    active_tab: Mutex<Option<usize>>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Agent loops can stall for minutes between tool calls; the default
        // 30 second idle timeout would tear the session down underneath them
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, active_tab: Mutex::new(None) })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser, active_tab: Mutex::new(None) })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the tab the agent is currently working in.
    ///
    /// Prefers the explicitly recorded tab, then any tab the browser reports
    /// as visible and focused, then the first open tab.
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;
        if tabs.is_empty() {
            return Err(BrowserError::TabOperationFailed("No open tabs".to_string()));
        }

        if let Some(index) = *self.active_tab.lock().unwrap_or_else(|e| e.into_inner()) {
            if let Some(tab) = tabs.get(index) {
                return Ok(tab.clone());
            }
        }

        for tab in &tabs {
            let focused = tab
                .evaluate("document.visibilityState === 'visible' && document.hasFocus()", false)
                .ok()
                .and_then(|o| o.value)
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if focused {
                return Ok(tab.clone());
            }
        }

        Ok(tabs[0].clone())
    }

    /// Create a new tab, activate it, and record it as current
    pub fn new_tab(&self) -> Result<Arc<Tab>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;

        tab.activate()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to activate tab: {}", e)))?;

        let count = self.get_tabs()?.len();
        *self.active_tab.lock().unwrap_or_else(|e| e.into_inner()) = Some(count.saturating_sub(1));

        Ok(tab)
    }

    /// Switch to the tab at the given position. Negative positions index from
    /// the end, so -1 selects the most recently opened tab.
    pub fn switch_to_tab(&self, position: isize) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;
        let count = tabs.len() as isize;

        let resolved = if position < 0 { count + position } else { position };
        if resolved < 0 || resolved >= count {
            return Err(BrowserError::TabOperationFailed(format!(
                "No tab at position {} ({} open)",
                position, count
            )));
        }

        let tab = tabs[resolved as usize].clone();
        tab.activate()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to activate tab: {}", e)))?;

        *self.active_tab.lock().unwrap_or_else(|e| e.into_inner()) = Some(resolved as usize);

        Ok(tab)
    }

    /// Number of open tabs
    pub fn tab_count(&self) -> Result<usize> {
        Ok(self.get_tabs()?.len())
    }

    /// Navigate the current tab to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// URL of the current tab
    pub fn current_url(&self) -> Result<String> {
        Ok(self.tab()?.get_url())
    }

    /// Full HTML content of the current tab
    pub fn page_content(&self) -> Result<String> {
        self.tab()?
            .get_content()
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to get page content: {}", e)))
    }

    /// Navigate back in browser history
    pub fn go_back(&self) -> Result<()> {
        self.evaluate("window.history.back(); true")?;

        // Give the renderer a moment to start the navigation
        std::thread::sleep(Duration::from_millis(300));

        Ok(())
    }

    /// Navigate forward in browser history
    pub fn go_forward(&self) -> Result<()> {
        self.evaluate("window.history.forward(); true")?;

        std::thread::sleep(Duration::from_millis(300));

        Ok(())
    }

    /// Evaluate a JavaScript expression in the current tab and return its value
    pub fn evaluate(&self, expression: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .tab()?
            .evaluate(expression, false)
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;

        Ok(result.value)
    }

    /// Scroll the current tab vertically. Positive direction scrolls down,
    /// negative up; without an amount, scrolls one viewport height.
    pub fn scroll_by(&self, amount: Option<i64>, direction: i64) -> Result<()> {
        let sign = if direction < 0 { -1 } else { 1 };
        let expression = match amount {
            Some(pixels) => format!("window.scrollBy(0, {});", pixels.abs() * sign),
            None => format!("window.scrollBy(0, window.innerHeight * {});", sign),
        };
        self.evaluate(&expression)?;
        Ok(())
    }

    /// Pixels of page content above and below the current viewport
    pub fn scroll_position(&self) -> Result<(i64, i64)> {
        let value = self
            .evaluate(
                "JSON.stringify([Math.round(window.scrollY), \
                 Math.max(0, Math.round(document.documentElement.scrollHeight - window.innerHeight - window.scrollY))])",
            )?
            .ok_or_else(|| BrowserError::EvaluationFailed("No scroll metrics returned".to_string()))?;

        let json_str = value
            .as_str()
            .ok_or_else(|| BrowserError::EvaluationFailed("Scroll metrics were not a string".to_string()))?;
        let pair: (i64, i64) = serde_json::from_str(json_str)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to parse scroll metrics: {}", e)))?;

        Ok(pair)
    }

    /// Press a key or key combination (e.g. "Enter", "Escape") in the current tab
    pub fn press_key(&self, key: &str) -> Result<()> {
        self.tab()?
            .press_key(key)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to press key '{}': {}", key, e)))?;

        Ok(())
    }

    /// Extract the DOM tree from the current tab
    pub fn extract_dom(&self) -> Result<DomTree> {
        DomTree::from_tab(self.tab()?.as_ref())
    }

    /// Find an element by CSS selector in the provided tab
    pub fn find_element<'a>(&self, tab: &'a Tab, css_selector: &str) -> Result<Element<'a>> {
        tab.find_element(css_selector)
            .map_err(|e| BrowserError::ElementNotFound(format!("Element '{}' not found: {}", css_selector, e)))
    }

    /// Find an element by XPath in the provided tab
    pub fn find_element_by_xpath<'a>(&self, tab: &'a Tab, xpath: &str) -> Result<Element<'a>> {
        tab.find_element_by_xpath(xpath)
            .map_err(|e| BrowserError::ElementNotFound(format!("Element '{}' not found: {}", xpath, e)))
    }

    /// Capture a PNG screenshot of the current tab
    pub fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        let tab = self.tab()?;

        let clip = if full_page {
            let metrics = self
                .evaluate(
                    "JSON.stringify([document.documentElement.scrollWidth, document.documentElement.scrollHeight])",
                )?
                .and_then(|v| v.as_str().map(str::to_string))
                .and_then(|s| serde_json::from_str::<(f64, f64)>(&s).ok());

            metrics.map(|(width, height)| Page::Viewport { x: 0.0, y: 0.0, width, height, scale: 1.0 })
        } else {
            None
        };

        tab.capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, clip, true)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Screenshot failed: {}", e)))
    }

    /// Close the browser by closing every tab; the process exits when the
    /// Browser instance is dropped
    pub fn close(&self) -> Result<()> {
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}
