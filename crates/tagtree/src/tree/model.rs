//! Element tree data model

use indexmap::IndexMap;

/// One decoded XML element with its attributes and ordered children
///
/// `name` and `namespace` are fixed at construction. Attributes are keyed by
/// local name and keep document order. Children never point back at their
/// parent; navigation is strictly top-down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    name: String,
    namespace: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
}

/// A child of an [`Element`], in document order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Element {
    /// Element with no namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_namespace(name, "")
    }

    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Local tag name, without prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI, empty when none applies
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Add or replace an attribute; a replaced attribute keeps its position
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push_child(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub fn with_comment(self, body: impl Into<String>) -> Self {
        self.with_child(Node::Comment(body.into()))
    }

    pub(crate) fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&str> {
        match self {
            Self::Comment(body) => Some(body),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let element = Element::with_namespace("feed", "urn:feed")
            .with_attribute("id", "1")
            .with_child(Element::new("entry"))
            .with_text("body")
            .with_comment(" c ");

        assert_eq!(element.name(), "feed");
        assert_eq!(element.namespace(), "urn:feed");
        assert_eq!(element.attributes().get("id").map(String::as_str), Some("1"));
        assert_eq!(element.children().len(), 3);
        assert_eq!(
            element.children().first().and_then(Node::as_element).map(Element::name),
            Some("entry")
        );
        assert_eq!(element.children().get(1).and_then(Node::as_text), Some("body"));
        assert_eq!(element.children().get(2).and_then(Node::as_comment), Some(" c "));
    }

    #[test]
    fn test_replaced_attribute_keeps_position() {
        let element = Element::new("a")
            .with_attribute("x", "1")
            .with_attribute("y", "2")
            .with_attribute("x", "3");
        let attrs: Vec<(&str, &str)> = element
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(attrs, vec![("x", "3"), ("y", "2")]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_snapshot() -> Result<(), serde_json::Error> {
        let element = Element::new("a")
            .with_attribute("x", "1")
            .with_text("t")
            .with_comment("c");
        let json = serde_json::to_value(&element)?;
        assert_eq!(json["attributes"]["x"], "1");
        assert_eq!(json["children"][0]["Text"], "t");

        let back: Element = serde_json::from_value(json)?;
        assert_eq!(back, element);
        Ok(())
    }
}
