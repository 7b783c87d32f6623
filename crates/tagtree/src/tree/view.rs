//! Navigation for types that wrap an [`Element`]
//!
//! A host type that owns a decoded tree implements [`ElementView`] by
//! returning that tree, and gets the whole query API through the default
//! methods:
//!
//! ```
//! use tagtree::{Element, ElementView};
//!
//! struct Band(Element);
//!
//! impl ElementView for Band {
//!     fn element(&self) -> &Element {
//!         &self.0
//!     }
//! }
//!
//! impl Band {
//!     fn guitar(&self) -> Option<String> {
//!         self.get_by_tag_name("Guitar").map(Element::content)
//!     }
//! }
//!
//! # fn main() -> Result<(), tagtree::Error> {
//! let band = Band(tagtree::from_str("<Band><Guitar>Jimmy Page</Guitar></Band>")?);
//! assert_eq!(band.guitar().as_deref(), Some("Jimmy Page"));
//! # Ok(())
//! # }
//! ```

use crate::tree::model::{Element, Node};

pub trait ElementView {
    /// The wrapped tree
    fn element(&self) -> &Element;

    fn name(&self) -> &str {
        self.element().name()
    }

    fn namespace(&self) -> &str {
        self.element().namespace()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.element().attr(name)
    }

    fn n_children(&self) -> usize {
        self.element().n_children()
    }

    fn nth_child(&self, index: usize) -> Option<&Node> {
        self.element().nth_child(index)
    }

    fn get_by_tag_name(&self, tag: &str) -> Option<&Element> {
        self.element().get_by_tag_name(tag)
    }

    fn get_child_by_name(&self, name: &str) -> Option<&Element> {
        self.element().get_child_by_name(name)
    }

    fn get_children_by_name(&self, name: &str) -> Vec<&Element> {
        self.element().get_children_by_name(name)
    }

    fn char_data(&self) -> Vec<&str> {
        self.element().char_data()
    }

    fn content(&self) -> String {
        self.element().content()
    }
}

impl ElementView for Element {
    fn element(&self) -> &Element {
        self
    }
}
