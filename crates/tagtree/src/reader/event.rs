//! Events produced by the pull reader and consumed by the writer

use std::fmt;

/// Namespace-qualified name
///
/// `space` holds the resolved namespace URI (or an unbound prefix verbatim),
/// `local` the name with any prefix removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Name {
    pub space: String,
    pub local: String,
}

impl Name {
    /// Name with no namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            space: String::new(),
            local: local.into(),
        }
    }

    /// Name in a namespace
    pub fn new(space: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            local: local.into(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.space.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{{{}}}{}", self.space, self.local)
        }
    }
}

/// A single attribute on a start tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

impl Attribute {
    pub fn new(name: Name, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Opening tag with attributes in document order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartTag {
    pub name: Name,
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    /// The end tag closing this element
    pub fn end(&self) -> EndTag {
        EndTag {
            name: self.name.clone(),
        }
    }
}

/// Closing tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndTag {
    pub name: Name,
}

/// Events emitted by the streaming XML reader
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `<name ...>`, also emitted for the opening half of `<name/>`
    Start(StartTag),
    /// `</name>`, also emitted for the closing half of `<name/>`
    End(EndTag),
    /// Character data with entities expanded; CDATA sections arrive here too
    Text(String),
    /// `<!-- ... -->` body
    Comment(String),
    /// `<?target data?>`
    ProcessingInstruction { target: String, data: String },
    /// `<!DOCTYPE ...>` and other `<!...>` markup, without the delimiters
    Directive(String),
}

impl Event {
    /// Short label for diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start tag",
            Self::End(_) => "end tag",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::ProcessingInstruction { .. } => "processing instruction",
            Self::Directive(_) => "directive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_display() {
        assert_eq!(Name::local("item").to_string(), "item");
        assert_eq!(
            Name::new("http://foo.com/", "foo").to_string(),
            "{http://foo.com/}foo"
        );
    }

    #[test]
    fn test_start_tag_end() {
        let start = StartTag::new(Name::new("urn:x", "a"));
        assert_eq!(start.end().name, start.name);
    }

    #[test]
    fn test_event_equality() {
        assert_eq!(
            Event::Text("x".to_string()),
            Event::Text("x".to_string())
        );
        assert_ne!(
            Event::Text("x".to_string()),
            Event::Comment("x".to_string())
        );
        assert_eq!(Event::Directive(String::new()).name(), "directive");
    }
}
