use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes surfaced to the agent when rendering elements
pub const AGENT_ATTRIBUTES: &[&str] = &["type", "role", "placeholder", "aria-label", "title"];

/// Represents a DOM element node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "button", "input")
    pub tag_name: String,

    /// Element attributes (e.g., id, class, href, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Direct text content of the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Position-based XPath from the document root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,

    /// Index assigned to this element (for interactive elements)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Whether the element is visible in the viewport
    #[serde(default)]
    pub is_visible: bool,

    /// Whether the element is interactive (clickable, input, etc.)
    #[serde(default)]
    pub is_interactive: bool,

    /// Bounding box information (x, y, width, height)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Bounding box coordinates for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: HashMap::new(),
            text_content: None,
            xpath: None,
            children: Vec::new(),
            index: None,
            is_visible: false,
            is_interactive: false,
            bounding_box: None,
        }
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set XPath
    pub fn with_xpath(mut self, xpath: impl Into<String>) -> Self {
        self.xpath = Some(xpath.into());
        self
    }

    /// Builder method: set visibility
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Determine if this element should be considered interactive
    pub fn compute_interactivity(&mut self) {
        let interactive_tags = ["button", "a", "input", "select", "textarea", "summary"];

        let tag_is_interactive = interactive_tags.iter().any(|&tag| self.is_tag(tag));

        // Inline event handlers make any element clickable
        let has_event_handler = self.attributes.keys().any(|k| k.starts_with("on"));

        let has_clickable_role = self
            .get_attribute("role")
            .map_or(false, |r| ["button", "link", "tab", "menuitem", "checkbox", "option"].contains(&r.as_str()));

        self.is_interactive = tag_is_interactive || has_event_handler || has_clickable_role;
    }

    /// Whether interacting with this element opens a file-picker dialog.
    ///
    /// True for `<input type="file">` itself and, within `max_depth` levels,
    /// for elements wrapping one (labels and styled upload buttons).
    pub fn is_file_uploader(&self, max_depth: usize) -> bool {
        if self.is_tag("input")
            && self.get_attribute("type").map_or(false, |t| t.eq_ignore_ascii_case("file"))
        {
            return true;
        }

        if max_depth == 0 {
            return false;
        }

        self.children.iter().any(|child| child.is_file_uploader(max_depth - 1))
    }

    /// Collect the visible text of this element and its descendants, stopping
    /// at nested interactive elements and at `max_depth` levels down. Used to
    /// describe what a click landed on.
    pub fn text_preview(&self, max_depth: usize) -> String {
        let mut parts = Vec::new();
        self.collect_text(max_depth, true, &mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, depth_left: usize, is_root: bool, parts: &mut Vec<String>) {
        if !is_root && self.is_interactive {
            return;
        }

        if let Some(text) = &self.text_content {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }

        if depth_left == 0 {
            return;
        }

        for child in &self.children {
            child.collect_text(depth_left - 1, false, parts);
        }
    }

    /// Render this element as a line in the agent-facing element listing,
    /// e.g. `[3]<button aria-label="Search">Go</button>`
    pub fn to_prompt_line(&self, include_attributes: &[&str]) -> String {
        let mut line = String::new();

        if let Some(index) = self.index {
            line.push_str(&format!("[{}]", index));
        }

        line.push('<');
        line.push_str(&self.tag_name);

        for attr in include_attributes {
            if let Some(value) = self.get_attribute(attr) {
                if !value.is_empty() {
                    line.push_str(&format!(" {}=\"{}\"", attr, value));
                }
            }
        }

        line.push('>');

        let text = self.text_preview(2);
        if !text.is_empty() {
            line.push_str(&text);
        }

        line.push_str(&format!("</{}>", self.tag_name));
        line
    }

    /// Simplify element by removing unnecessary children (like scripts, styles)
    pub fn simplify(&mut self) {
        self.children
            .retain(|child| !matches!(child.tag_name.as_str(), "script" | "style" | "noscript"));

        for child in &mut self.children {
            child.simplify();
        }
    }
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the bounding box has non-zero dimensions
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
