use crate::dom::element::{ElementNode, AGENT_ATTRIBUTES};
use crate::dom::selector_map::{ElementSelector, SelectorMap};
use crate::error::{BrowserError, Result};
use crate::tools::utils::truncate_chars;
use headless_chrome::Tab;

/// Represents the DOM tree of a web page
#[derive(Debug, Clone)]
pub struct DomTree {
    /// Root element of the DOM tree
    pub root: ElementNode,

    /// Map of indices to element selectors
    pub selector_map: SelectorMap,
}

impl DomTree {
    /// Create a new DomTree and index its interactive elements
    pub fn new(root: ElementNode) -> Self {
        let mut tree = Self { root, selector_map: SelectorMap::new() };
        tree.build_selector_map();
        tree
    }

    /// Build DOM tree from a browser tab
    pub fn from_tab(tab: &Tab) -> Result<Self> {
        // The extraction script serializes a filtered element tree to JSON
        let js_code = include_str!("extract_dom.js");

        let result = tab
            .evaluate(js_code, false)
            .map_err(|e| BrowserError::DomParseFailed(format!("Failed to execute DOM extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| BrowserError::DomParseFailed("No value returned from DOM extraction".to_string()))?;

        // The script returns a JSON string, not an object
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| BrowserError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        let root: ElementNode = serde_json::from_str(&json_str)
            .map_err(|e| BrowserError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e)))?;

        Ok(Self::new(root))
    }

    /// Build the selector map by traversing the DOM tree
    fn build_selector_map(&mut self) {
        self.selector_map.clear();
        Self::traverse_and_index(&mut self.root, &mut self.selector_map);
    }

    fn traverse_and_index(node: &mut ElementNode, selector_map: &mut SelectorMap) {
        node.compute_interactivity();

        if node.is_interactive && node.is_visible {
            if let Some(selector) = Self::build_selector(node) {
                let index = selector_map.register(selector);
                node.index = Some(index);
            }
        }

        for child in node.children.iter_mut() {
            Self::traverse_and_index(child, selector_map);
        }
    }

    /// Build an ElementSelector for a node; nodes without an XPath (the
    /// extraction script always assigns one) cannot be located later and are
    /// skipped.
    fn build_selector(node: &ElementNode) -> Option<ElementSelector> {
        let xpath = node.xpath.clone()?;

        let mut selector = ElementSelector::new(xpath, &node.tag_name);

        if let Some(id) = node.id() {
            selector = selector.with_css(format!("#{}", id));
        }

        if let Some(text) = &node.text_content {
            selector = selector.with_text(truncate_chars(text, 50));
        }

        Some(selector)
    }

    /// Simplify the DOM tree by removing script/style elements
    pub fn simplify(&mut self) {
        self.root.simplify();
        self.build_selector_map(); // Rebuild map after simplification
    }

    /// Convert the DOM tree to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| BrowserError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Render the indexed interactive elements as the agent-facing listing:
    /// one `[index]<tag attr="…">text</tag>` line per element.
    pub fn to_prompt_string(&self) -> String {
        let mut lines = Vec::new();
        Self::collect_prompt_lines(&self.root, &mut lines);

        if lines.is_empty() {
            "No interactive elements found on this page".to_string()
        } else {
            lines.join("\n")
        }
    }

    fn collect_prompt_lines(node: &ElementNode, lines: &mut Vec<String>) {
        if node.index.is_some() {
            lines.push(node.to_prompt_line(AGENT_ATTRIBUTES));
        }
        for child in &node.children {
            Self::collect_prompt_lines(child, lines);
        }
    }

    /// Get element selector by index
    pub fn get_selector(&self, index: usize) -> Option<&ElementSelector> {
        self.selector_map.get(index)
    }

    /// Whether the given index refers to a known interactive element
    pub fn contains_index(&self, index: usize) -> bool {
        self.selector_map.contains(index)
    }

    /// Get all interactive element indices
    pub fn interactive_indices(&self) -> Vec<usize> {
        self.selector_map.indices().copied().collect()
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        Self::count_recursive(&self.root)
    }

    fn count_recursive(node: &ElementNode) -> usize {
        1 + node.children.iter().map(Self::count_recursive).sum::<usize>()
    }

    /// Count interactive elements
    pub fn count_interactive(&self) -> usize {
        self.selector_map.len()
    }

    /// Find element node by index (traverse the tree)
    pub fn find_node_by_index(&self, index: usize) -> Option<&ElementNode> {
        Self::find_recursive(&self.root, index)
    }

    fn find_recursive(node: &ElementNode, target_index: usize) -> Option<&ElementNode> {
        if node.index == Some(target_index) {
            return Some(node);
        }

        for child in &node.children {
            if let Some(found) = Self::find_recursive(child, target_index) {
                return Some(found);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tree() -> ElementNode {
        let mut root = ElementNode::new("body");
        root.xpath = Some("/html/body".to_string());

        let mut header = ElementNode::new("header");

        let mut nav_button = ElementNode::new("button");
        nav_button.add_attribute("id", "nav-btn");
        nav_button.text_content = Some("Menu".to_string());
        nav_button.xpath = Some("/html/body/header[1]/button[1]".to_string());
        nav_button.is_visible = true;
        header.add_child(nav_button);

        let mut main = ElementNode::new("main");

        let mut link = ElementNode::new("a");
        link.add_attribute("href", "/page");
        link.text_content = Some("Click here".to_string());
        link.xpath = Some("/html/body/main[1]/a[1]".to_string());
        link.is_visible = true;
        main.add_child(link);

        let mut div = ElementNode::new("div");
        div.add_attribute("class", "content");
        div.text_content = Some("Some text".to_string());
        div.xpath = Some("/html/body/main[1]/div[1]".to_string());
        main.add_child(div);

        root.add_child(header);
        root.add_child(main);

        root
    }

    #[test]
    fn test_build_selector_map() {
        let tree = DomTree::new(create_test_tree());

        // Button and link are interactive and visible; the div is neither
        assert_eq!(tree.count_interactive(), 2);
    }

    #[test]
    fn test_selector_prefers_id_css() {
        let tree = DomTree::new(create_test_tree());

        let selector = tree.get_selector(0).unwrap();
        assert_eq!(selector.css_selector, Some("#nav-btn".to_string()));
        assert_eq!(selector.xpath, "/html/body/header[1]/button[1]");
    }

    #[test]
    fn test_find_node_by_index() {
        let tree = DomTree::new(create_test_tree());

        for &index in &tree.interactive_indices() {
            let node = tree.find_node_by_index(index);
            assert!(node.is_some());
            assert_eq!(node.unwrap().index, Some(index));
        }

        assert!(tree.find_node_by_index(999).is_none());
    }

    #[test]
    fn test_contains_index() {
        let tree = DomTree::new(create_test_tree());

        assert!(tree.contains_index(0));
        assert!(tree.contains_index(1));
        assert!(!tree.contains_index(2));
    }

    #[test]
    fn test_count_elements() {
        let tree = DomTree::new(create_test_tree());

        // body + header + button + main + link + div
        assert_eq!(tree.count_elements(), 6);
    }

    #[test]
    fn test_to_prompt_string() {
        let tree = DomTree::new(create_test_tree());

        let listing = tree.to_prompt_string();
        assert!(listing.contains("[0]<button"));
        assert!(listing.contains("Menu"));
        assert!(listing.contains("[1]<a"));
        assert!(listing.contains("Click here"));
        assert!(!listing.contains("Some text"));
    }

    #[test]
    fn test_prompt_string_empty_tree() {
        let tree = DomTree::new(ElementNode::new("body"));
        assert_eq!(tree.to_prompt_string(), "No interactive elements found on this page");
    }

    #[test]
    fn test_simplify() {
        let mut root = ElementNode::new("body");
        root.add_child(ElementNode::new("p").with_text("Content"));
        root.add_child(ElementNode::new("script").with_text("alert('test')"));
        root.add_child(ElementNode::new("style").with_text(".test {}"));

        let mut tree = DomTree::new(root);
        tree.simplify();

        assert_eq!(tree.root.children.len(), 1);
        assert!(tree.root.children[0].is_tag("p"));
    }

    #[test]
    fn test_to_json() {
        let mut root = ElementNode::new("div");
        root.add_attribute("id", "container");
        root.add_child(ElementNode::new("span").with_text("Hello"));

        let tree = DomTree::new(root);
        let json = tree.to_json().unwrap();

        assert!(json.contains("\"tag_name\": \"div\""));
        assert!(json.contains("\"span\""));
        assert!(json.contains("Hello"));
    }
}
