//! tagtree - schema-less XML element trees
//!
//! Decode arbitrary XML into an [`Element`] tree, query it without a
//! matching struct definition, and encode it back out.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), tagtree::Error> {
//! let rss = tagtree::from_str(r#"<rss><item d="one"/><item d="two"/></rss>"#)?;
//! let items = rss.get_children_by_name("ITEM");
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.get(1).and_then(|item| item.attr("d")), Some("two"));
//!
//! let xml = tagtree::to_string(&rss)?;
//! assert_eq!(xml, r#"<rss><item d="one"></item><item d="two"></item></rss>"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::Input;

pub mod lexer;

pub mod reader;
pub use reader::{Config, Event, Reader};

pub mod writer;
pub use writer::Writer;

pub mod tree;
pub use tree::{Element, ElementView, Node};

/// Decode an element tree from a string
pub fn from_str(s: &str) -> Result<Element> {
    from_input(Input::from_str(s), Config::default())
}

/// Decode an element tree from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Element> {
    from_input(Input::from_bytes(bytes), Config::default())
}

/// Decode with custom reader limits
pub fn from_str_with_config(s: &str, config: Config) -> Result<Element> {
    from_input(Input::from_str(s), config)
}

/// Decode the first element of `input`
///
/// Errors carry the input's filename when one was set.
#[instrument(level = "debug", skip_all, fields(source = input.display_name(), len = input.len()))]
pub fn from_input(input: Input<'_>, config: Config) -> Result<Element> {
    let mut reader = Reader::with_config(input.as_bytes(), config);
    let root = Element::from_reader(&mut reader).map_err(|err| input.locate(err))?;
    debug!(root = %root.name(), children = root.n_children(), "decoded element tree");
    Ok(root)
}

/// Encode without indentation
pub fn to_string(element: &Element) -> Result<String> {
    element.to_xml_string("")
}

/// Encode with nested elements indented by `step`
pub fn to_string_pretty(element: &Element, step: &str) -> Result<String> {
    element.to_xml_string(step)
}
