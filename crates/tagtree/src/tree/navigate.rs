//! Read-only queries over an element tree
//!
//! None of these fail: a missing attribute, child or index is reported as
//! `None` or an empty `Vec`.

use crate::tree::model::{Element, Node};

impl Element {
    /// Value of the attribute with the given local name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    /// Number of direct children of any kind
    pub fn n_children(&self) -> usize {
        self.children().len()
    }

    /// Direct child at `index`, `None` when `index >= n_children()`
    pub fn nth_child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    /// Direct child elements in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children().iter().filter_map(Node::as_element)
    }

    /// First element anywhere below this one whose name is exactly `tag`
    ///
    /// Children are visited left to right; each child is tested before its
    /// own subtree is searched.
    pub fn get_by_tag_name(&self, tag: &str) -> Option<&Self> {
        for child in self.child_elements() {
            if child.name() == tag {
                return Some(child);
            }
            if let Some(found) = child.get_by_tag_name(tag) {
                return Some(found);
            }
        }
        None
    }

    /// First direct child whose name matches, ignoring case and surrounding
    /// whitespace
    pub fn get_child_by_name(&self, name: &str) -> Option<&Self> {
        let wanted = normalize(name);
        self.child_elements()
            .find(|child| normalize(child.name()) == wanted)
    }

    /// All direct children matched as in [`Element::get_child_by_name`]
    pub fn get_children_by_name(&self, name: &str) -> Vec<&Self> {
        let wanted = normalize(name);
        self.child_elements()
            .filter(|child| normalize(child.name()) == wanted)
            .collect()
    }

    /// Direct text children in document order
    pub fn char_data(&self) -> Vec<&str> {
        self.children().iter().filter_map(Node::as_text).collect()
    }

    /// Direct text children joined with no separator
    pub fn content(&self) -> String {
        self.char_data().concat()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
