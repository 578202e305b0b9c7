//! DOM extraction and element indexing
//!
//! Extracts a filtered element tree from the page and assigns numeric
//! indices to visible interactive elements, so agents can target them
//! without writing selectors:
//! - ElementNode: representation of DOM elements
//! - DomTree: complete DOM tree with indexing for interactive elements
//! - SelectorMap: mapping of indices to element locators (XPath, CSS)

pub mod element;
pub mod selector_map;
pub mod tree;

pub use element::{BoundingBox, ElementNode, AGENT_ATTRIBUTES};
pub use selector_map::{ElementSelector, SelectorMap};
pub use tree::DomTree;

use crate::error::Result;
use headless_chrome::Tab;

/// Extract the DOM tree from a browser tab
pub fn extract_dom(tab: &Tab) -> Result<DomTree> {
    DomTree::from_tab(tab)
}

/// Extract and simplify the DOM tree
pub fn extract_simplified_dom(tab: &Tab) -> Result<DomTree> {
    let mut tree = DomTree::from_tab(tab)?;
    tree.simplify();
    Ok(tree)
}
