//! Writing an element tree back out as XML

use std::fmt;
use std::io::Write;

use crate::error::{Error, ErrorKind, Result};
use crate::reader::{Attribute, Name, StartTag};
use crate::tree::model::{Element, Node};
use crate::writer::Writer;

impl Element {
    /// Start tag carrying this element's name, namespace and attributes
    pub fn start_tag(&self) -> StartTag {
        StartTag {
            name: Name::new(self.namespace(), self.name()),
            attributes: self
                .attributes()
                .iter()
                .map(|(name, value)| Attribute::new(Name::local(name.as_str()), value.as_str()))
                .collect(),
        }
    }

    /// Encode this element and its subtree, then flush the writer
    ///
    /// The first write error aborts encoding and is returned as is.
    pub fn encode<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let start = self.start_tag();
        writer.start_tag(&start)?;
        for child in self.children() {
            match child {
                Node::Element(element) => element.encode(writer)?,
                Node::Text(text) => writer.text(text)?,
                Node::Comment(body) => writer.comment(body)?,
            }
        }
        writer.end_tag(&start.end())?;
        writer.flush()
    }

    /// Encode into `out`, indenting nested elements by `step` (empty for
    /// compact output), and hand the sink back
    pub fn write_to<W: Write>(&self, out: W, step: &str) -> Result<W> {
        let mut writer = Writer::new(out).with_indent("", step);
        self.encode(&mut writer)?;
        writer.close()?;
        Ok(writer.into_inner())
    }

    /// Render to a string, indenting nested elements by `step`
    pub fn to_xml_string(&self, step: &str) -> Result<String> {
        let bytes = self.write_to(Vec::new(), step)?;
        String::from_utf8(bytes).map_err(|_| Error::output(ErrorKind::InvalidUtf8))
    }
}

/// Renders with a one-space indent
///
/// Encoding failures are rendered as a `failed to render xml: ...` line; use
/// [`Element::encode`] to tell success from failure.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml_string(" ") {
            Ok(xml) => f.write_str(&xml),
            Err(err) => write!(f, "failed to render xml: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_compact() -> Result<()> {
        let element = Element::new("root")
            .with_attribute("id", "7")
            .with_child(Element::new("child").with_text("a & b"))
            .with_comment(" note ");
        assert_eq!(
            element.to_xml_string("")?,
            "<root id=\"7\"><child>a &amp; b</child><!-- note --></root>"
        );
        Ok(())
    }

    #[test]
    fn test_display_uses_single_space_indent() {
        let element = Element::new("Band")
            .with_child(Element::new("Vocals").with_text("Robert Plant"))
            .with_child(Element::new("Guitar").with_text("Jimmy Page"));
        assert_eq!(
            element.to_string(),
            "<Band>\n <Vocals>Robert Plant</Vocals>\n <Guitar>Jimmy Page</Guitar>\n</Band>"
        );
    }

    #[test]
    fn test_display_failure_placeholder() {
        let element = Element::new("a").with_comment("bad -- comment");
        assert!(element.to_string().starts_with("failed to render xml:"));
    }

    #[test]
    fn test_namespace_written_on_change_only() -> Result<()> {
        let element = Element::with_namespace("feed", "urn:a")
            .with_child(Element::with_namespace("entry", "urn:a"))
            .with_child(Element::new("plain"));
        assert_eq!(
            element.to_xml_string("")?,
            "<feed xmlns=\"urn:a\"><entry></entry><plain xmlns=\"\"></plain></feed>"
        );
        Ok(())
    }

    #[test]
    fn test_write_error_propagates() {
        let element = Element::new("bad name");
        let err = element.to_xml_string("").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::InvalidName { .. })
        ));
    }
}
