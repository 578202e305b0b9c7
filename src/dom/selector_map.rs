use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Information needed to locate an indexed element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementSelector {
    /// Position-based XPath, the primary locator
    pub xpath: String,

    /// CSS shortcut when the element has an id attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,

    /// Element's tag name
    pub tag_name: String,

    /// Element's text content (truncated for display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ElementSelector {
    /// Create a new ElementSelector from an XPath
    pub fn new(xpath: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            xpath: xpath.into(),
            css_selector: None,
            tag_name: tag_name.into(),
            text: None,
        }
    }

    /// Builder method: set the CSS shortcut
    pub fn with_css(mut self, css_selector: impl Into<String>) -> Self {
        self.css_selector = Some(css_selector.into());
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Map of element indices to their selectors
/// Uses IndexMap to preserve insertion order
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    /// Map from index to selector information
    map: IndexMap<usize, ElementSelector>,

    /// Next available index
    next_index: usize,
}

impl SelectorMap {
    /// Create a new empty SelectorMap
    pub fn new() -> Self {
        Self { map: IndexMap::new(), next_index: 0 }
    }

    /// Register a new element and return its assigned index
    pub fn register(&mut self, selector: ElementSelector) -> usize {
        let index = self.next_index;
        self.map.insert(index, selector);
        self.next_index += 1;
        index
    }

    /// Get selector by index
    pub fn get(&self, index: usize) -> Option<&ElementSelector> {
        self.map.get(&index)
    }

    /// Check if index exists
    pub fn contains(&self, index: usize) -> bool {
        self.map.contains_key(&index)
    }

    /// Get the number of registered elements
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all elements
    pub fn clear(&mut self) {
        self.map.clear();
        self.next_index = 0;
    }

    /// Iterate over all (index, selector) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&usize, &ElementSelector)> {
        self.map.iter()
    }

    /// Get all indices
    pub fn indices(&self) -> impl Iterator<Item = &usize> {
        self.map.keys()
    }

    /// Find index by XPath
    pub fn find_by_xpath(&self, xpath: &str) -> Option<usize> {
        self.map.iter().find(|(_, sel)| sel.xpath == xpath).map(|(idx, _)| *idx)
    }

    /// Export to JSON for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_selector() {
        let selector = ElementSelector::new("/html/body/button[1]", "button")
            .with_css("#my-button")
            .with_text("Click me");

        assert_eq!(selector.xpath, "/html/body/button[1]");
        assert_eq!(selector.css_selector, Some("#my-button".to_string()));
        assert_eq!(selector.tag_name, "button");
        assert_eq!(selector.text, Some("Click me".to_string()));
    }

    #[test]
    fn test_selector_map_register() {
        let mut map = SelectorMap::new();

        let idx1 = map.register(ElementSelector::new("/html/body/button[1]", "button"));
        let idx2 = map.register(ElementSelector::new("/html/body/button[2]", "button"));

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_selector_map_get() {
        let mut map = SelectorMap::new();

        let selector = ElementSelector::new("/html/body/div[1]", "div").with_css("#test");
        let index = map.register(selector);

        let retrieved = map.get(index).unwrap();
        assert_eq!(retrieved.xpath, "/html/body/div[1]");
        assert_eq!(retrieved.css_selector, Some("#test".to_string()));
        assert!(!map.contains(index + 1));
    }

    #[test]
    fn test_selector_map_clear() {
        let mut map = SelectorMap::new();

        map.register(ElementSelector::new("/html/body/div[1]", "div"));
        map.register(ElementSelector::new("/html/body/div[2]", "div"));

        assert_eq!(map.len(), 2);

        map.clear();

        assert!(map.is_empty());

        // Indices restart after a clear
        let idx = map.register(ElementSelector::new("/html/body/div[1]", "div"));
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_selector_map_find_by_xpath() {
        let mut map = SelectorMap::new();

        let idx1 = map.register(ElementSelector::new("/html/body/button[1]", "button"));
        map.register(ElementSelector::new("/html/body/a[1]", "a"));

        assert_eq!(map.find_by_xpath("/html/body/button[1]"), Some(idx1));
        assert_eq!(map.find_by_xpath("/html/body/missing[1]"), None);
    }

    #[test]
    fn test_selector_map_iteration_order() {
        let mut map = SelectorMap::new();

        map.register(ElementSelector::new("/a", "a"));
        map.register(ElementSelector::new("/b", "b"));
        map.register(ElementSelector::new("/c", "c"));

        let indices: Vec<_> = map.indices().copied().collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_selector_map_to_json() {
        let mut map = SelectorMap::new();

        map.register(ElementSelector::new("/html/body/button[1]", "button").with_text("Click"));

        let json = map.to_json().unwrap();
        assert!(json.contains("/html/body/button[1]"));
        assert!(json.contains("Click"));
    }
}
