//! Building an element tree from reader events

use tracing::trace;

use crate::error::{Error, ErrorKind, Result};
use crate::reader::{Event, Reader, StartTag};
use crate::tree::model::{Element, Node};

impl Element {
    /// Decode the element opened by `start`, consuming events up to and
    /// including its end tag
    ///
    /// Whitespace-only text is dropped; other text is kept untrimmed.
    /// Processing instructions and directives are skipped. Running out of
    /// input before the end tag closes the element implicitly.
    pub fn decode(reader: &mut Reader<'_>, start: StartTag) -> Result<Self> {
        let mut element = Self::with_namespace(start.name.local, start.name.space);
        for attr in start.attributes {
            // keyed by local name: a later attribute with the same local name wins
            element.set_attribute(attr.name.local, attr.value);
        }

        while let Some(event) = reader.next_event()? {
            match event {
                Event::Start(child) => {
                    let child = Self::decode(reader, child)?;
                    element.push_child(Node::Element(child));
                }
                Event::End(_) => break,
                Event::Text(text) => {
                    if !text.trim().is_empty() {
                        element.push_child(Node::Text(text));
                    }
                }
                Event::Comment(body) => element.push_child(Node::Comment(body)),
                other @ (Event::ProcessingInstruction { .. } | Event::Directive(_)) => {
                    trace!(kind = other.name(), element = %element.name(), "skipping markup");
                }
            }
        }

        Ok(element)
    }

    /// Decode the first element found in the reader's input
    ///
    /// Anything before the first start tag (prolog, doctype, comments) is
    /// skipped.
    pub fn from_reader(reader: &mut Reader<'_>) -> Result<Self> {
        while let Some(event) = reader.next_event()? {
            match event {
                Event::Start(start) => return Self::decode(reader, start),
                other => trace!(kind = other.name(), "skipping content before root"),
            }
        }
        Err(Error::at(ErrorKind::NoRootElement, reader.position()))
    }
}
