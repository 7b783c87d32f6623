//! Streaming XML reader module

pub mod event;
pub mod namespace;
pub mod parser;

pub use event::{Attribute, EndTag, Event, Name, StartTag};
pub use parser::{Config, Reader};
