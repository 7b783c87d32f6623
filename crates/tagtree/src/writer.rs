//! Push-based XML token writer

use std::io::Write;

use crate::error::{Error, ErrorKind, Result};
use crate::lexer::name::is_name;
use crate::reader::event::{EndTag, Event, Name, StartTag};
use crate::reader::namespace::{XMLNS_PREFIX, XML_NAMESPACE};

#[derive(Debug)]
struct OpenTag {
    name: Name,
    /// Default namespace in effect inside this element
    default_space: String,
}

/// Writes XML tokens to an [`std::io::Write`] sink
///
/// Start and end tags must balance; the writer tracks open elements and
/// emits `xmlns="..."` whenever an element's namespace differs from the
/// default namespace in scope. Elements are always written as explicit
/// start/end pairs.
#[derive(Debug)]
pub struct Writer<W: Write> {
    out: W,
    prefix: String,
    step: String,
    open: Vec<OpenTag>,
    depth: usize,
    /// Set after a start tag until something nested forces a line break
    indented_in: bool,
    put_newline: bool,
}

impl<W: Write> Writer<W> {
    /// Create a compact writer (no indentation)
    pub const fn new(out: W) -> Self {
        Self {
            out,
            prefix: String::new(),
            step: String::new(),
            open: Vec::new(),
            depth: 0,
            indented_in: false,
            put_newline: false,
        }
    }

    /// Indent nested elements: each line starts with `prefix` followed by
    /// one `step` per level of nesting
    pub fn with_indent(mut self, prefix: impl Into<String>, step: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.step = step.into();
        self
    }

    /// Write a single event
    pub fn write_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Start(start) => self.start_tag(start),
            Event::End(end) => self.end_tag(end),
            Event::Text(text) => self.text(text),
            Event::Comment(body) => self.comment(body),
            Event::ProcessingInstruction { target, data } => {
                self.processing_instruction(target, data)
            }
            Event::Directive(body) => self.directive(body),
        }
    }

    pub fn start_tag(&mut self, start: &StartTag) -> Result<()> {
        check_name(&start.name.local)?;

        let inherited = self
            .open
            .last()
            .map(|tag| tag.default_space.as_str())
            .unwrap_or_default();
        let declare_default = start.name.space != inherited;

        self.write_indent(1)?;
        write!(self.out, "<{}", start.name.local)?;
        if declare_default {
            self.out.write_all(b" xmlns=\"")?;
            write_escaped(&mut self.out, &start.name.space, true)?;
            self.out.write_all(b"\"")?;
        }

        for attr in &start.attributes {
            // the default namespace is owned by the element name
            if attr.name.space.is_empty() && attr.name.local == XMLNS_PREFIX {
                continue;
            }
            check_name(&attr.name.local)?;
            match attr.name.space.as_str() {
                XMLNS_PREFIX => write!(self.out, " xmlns:{}=\"", attr.name.local)?,
                XML_NAMESPACE => write!(self.out, " xml:{}=\"", attr.name.local)?,
                _ => write!(self.out, " {}=\"", attr.name.local)?,
            }
            write_escaped(&mut self.out, &attr.value, true)?;
            self.out.write_all(b"\"")?;
        }
        self.out.write_all(b">")?;

        self.open.push(OpenTag {
            name: start.name.clone(),
            default_space: start.name.space.clone(),
        });
        Ok(())
    }

    pub fn end_tag(&mut self, end: &EndTag) -> Result<()> {
        match self.open.last() {
            Some(tag) if tag.name == end.name => {}
            Some(tag) => {
                return Err(Error::output(ErrorKind::MismatchedTag {
                    expected: tag.name.to_string(),
                    found: end.name.to_string(),
                }));
            }
            None => {
                return Err(Error::output(ErrorKind::UnexpectedEndTag {
                    name: end.name.to_string(),
                }));
            }
        }

        self.write_indent(-1)?;
        write!(self.out, "</{}>", end.name.local)?;
        self.open.pop();
        Ok(())
    }

    /// Write character data, escaping markup characters
    pub fn text(&mut self, text: &str) -> Result<()> {
        write_escaped(&mut self.out, text, false)
    }

    pub fn comment(&mut self, body: &str) -> Result<()> {
        if body.contains("--") || body.ends_with('-') {
            return Err(Error::output(ErrorKind::Expected {
                expected: "comment without '--'".to_string(),
                found: format!("{body:?}"),
            }));
        }
        write!(self.out, "<!--{body}-->")?;
        Ok(())
    }

    pub fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        check_name(target)?;
        if data.contains("?>") {
            return Err(Error::output(ErrorKind::Expected {
                expected: "processing instruction without '?>'".to_string(),
                found: format!("{data:?}"),
            }));
        }
        if data.is_empty() {
            write!(self.out, "<?{target}?>")?;
        } else {
            write!(self.out, "<?{target} {data}?>")?;
        }
        Ok(())
    }

    pub fn directive(&mut self, body: &str) -> Result<()> {
        write!(self.out, "<!{body}>")?;
        Ok(())
    }

    /// Flush buffered output to the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and verify every start tag was closed
    pub fn close(&mut self) -> Result<()> {
        if let Some(tag) = self.open.last() {
            return Err(Error::output(ErrorKind::UnclosedTag {
                name: tag.name.to_string(),
            }));
        }
        self.flush()
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_indent(&mut self, delta: i8) -> Result<()> {
        if self.prefix.is_empty() && self.step.is_empty() {
            return Ok(());
        }
        if delta < 0 {
            self.depth = self.depth.saturating_sub(1);
            if self.indented_in {
                // element held only text: close on the same line
                self.indented_in = false;
                return Ok(());
            }
        }
        self.indented_in = false;

        if self.put_newline {
            self.out.write_all(b"\n")?;
        } else {
            self.put_newline = true;
        }
        self.out.write_all(self.prefix.as_bytes())?;
        for _ in 0..self.depth {
            self.out.write_all(self.step.as_bytes())?;
        }
        if delta > 0 {
            self.depth += 1;
            self.indented_in = true;
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    if is_name(name) {
        Ok(())
    } else {
        Err(Error::output(ErrorKind::InvalidName {
            name: name.to_string(),
        }))
    }
}

fn write_escaped<W: Write>(out: &mut W, input: &str, in_attribute: bool) -> Result<()> {
    let mut last = 0;
    for (idx, ch) in input.char_indices() {
        let replacement = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if in_attribute => "&quot;",
            '\t' if in_attribute => "&#x9;",
            '\n' if in_attribute => "&#xA;",
            '\r' => "&#xD;",
            _ => continue,
        };
        out.write_all(input.get(last..idx).unwrap_or_default().as_bytes())?;
        out.write_all(replacement.as_bytes())?;
        last = idx + ch.len_utf8();
    }
    out.write_all(input.get(last..).unwrap_or_default().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::event::Attribute;

    fn written(writer: Writer<Vec<u8>>) -> String {
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    fn tag(local: &str) -> StartTag {
        StartTag::new(Name::local(local))
    }

    #[test]
    fn test_compact_output() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        let mut root = tag("root");
        root.attributes
            .push(Attribute::new(Name::local("id"), "a\"b"));
        writer.start_tag(&root)?;
        writer.start_tag(&tag("child"))?;
        writer.text("x < y & z")?;
        writer.end_tag(&tag("child").end())?;
        writer.comment(" note ")?;
        writer.end_tag(&root.end())?;
        writer.close()?;

        assert_eq!(
            written(writer),
            "<root id=\"a&quot;b\"><child>x &lt; y &amp; z</child><!-- note --></root>"
        );
        Ok(())
    }

    #[test]
    fn test_indented_output() -> Result<()> {
        let mut writer = Writer::new(Vec::new()).with_indent("", " ");
        writer.start_tag(&tag("Band"))?;
        for (name, text) in [("Vocals", "Robert Plant"), ("Drums", "John Bonham")] {
            writer.start_tag(&tag(name))?;
            writer.text(text)?;
            writer.end_tag(&tag(name).end())?;
        }
        writer.start_tag(&tag("Empty"))?;
        writer.end_tag(&tag("Empty").end())?;
        writer.end_tag(&tag("Band").end())?;
        writer.close()?;

        assert_eq!(
            written(writer),
            "<Band>\n <Vocals>Robert Plant</Vocals>\n <Drums>John Bonham</Drums>\n <Empty></Empty>\n</Band>"
        );
        Ok(())
    }

    #[test]
    fn test_indent_prefix() -> Result<()> {
        let mut writer = Writer::new(Vec::new()).with_indent("> ", "\t");
        writer.start_tag(&tag("a"))?;
        writer.start_tag(&tag("b"))?;
        writer.end_tag(&tag("b").end())?;
        writer.end_tag(&tag("a").end())?;
        assert_eq!(written(writer), "> <a>\n> \t<b></b>\n> </a>");
        Ok(())
    }

    #[test]
    fn test_default_namespace_declared_once() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        let mut rss = StartTag::new(Name::new("rss.org/rss.dtd", "rss"));
        rss.attributes
            .push(Attribute::new(Name::local("xmlns"), "rss.org/rss.dtd"));
        rss.attributes
            .push(Attribute::new(Name::new("xmlns", "example"), "http://foo.com/"));
        let item = StartTag::new(Name::new("rss.org/rss.dtd", "item"));
        let other = StartTag::new(Name::new("http://foo.com/", "foo"));

        writer.start_tag(&rss)?;
        writer.start_tag(&item)?;
        writer.end_tag(&item.end())?;
        writer.start_tag(&other)?;
        writer.end_tag(&other.end())?;
        writer.end_tag(&rss.end())?;

        assert_eq!(
            written(writer),
            "<rss xmlns=\"rss.org/rss.dtd\" xmlns:example=\"http://foo.com/\"><item></item><foo xmlns=\"http://foo.com/\"></foo></rss>"
        );
        Ok(())
    }

    #[test]
    fn test_mismatched_end_tag() {
        let mut writer = Writer::new(Vec::new());
        let result = writer
            .start_tag(&tag("a"))
            .and_then(|()| writer.end_tag(&tag("b").end()));
        assert!(matches!(
            result.as_ref().map_err(Error::kind),
            Err(ErrorKind::MismatchedTag { .. })
        ));
    }

    #[test]
    fn test_end_tag_without_start() {
        let mut writer = Writer::new(Vec::new());
        assert!(writer.end_tag(&tag("a").end()).is_err());
    }

    #[test]
    fn test_close_with_open_tag() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        writer.start_tag(&tag("a"))?;
        assert!(matches!(
            writer.close().as_ref().map_err(Error::kind),
            Err(ErrorKind::UnclosedTag { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_comment_and_name() {
        let mut writer = Writer::new(Vec::new());
        assert!(writer.comment("a -- b").is_err());
        assert!(writer.start_tag(&tag("")).is_err());
        assert!(writer.start_tag(&tag("a b")).is_err());
    }

    #[test]
    fn test_non_ascii_names() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        let mut start = tag("a\u{B7}b");
        start.attributes.push(Attribute::new(Name::local("e\u{301}t"), "1"));
        writer.start_tag(&start)?;
        writer.end_tag(&start.end())?;
        assert_eq!(written(writer), "<a\u{B7}b e\u{301}t=\"1\"></a\u{B7}b>");

        let mut writer = Writer::new(Vec::new());
        assert!(writer.start_tag(&tag("\u{D7}")).is_err());
        assert!(writer.start_tag(&tag("\u{B7}a")).is_err());
        Ok(())
    }

    #[test]
    fn test_stored_xmlns_yields_to_element_namespace() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        let mut start = StartTag::new(Name::new("u", "b"));
        start.attributes.push(Attribute::new(Name::local("xmlns"), "v"));
        writer.start_tag(&start)?;
        writer.end_tag(&start.end())?;
        assert_eq!(written(writer), "<b xmlns=\"u\"></b>");
        Ok(())
    }

    #[test]
    fn test_write_event_passthrough() -> Result<()> {
        let mut writer = Writer::new(Vec::new());
        for event in [
            Event::ProcessingInstruction {
                target: "xml".to_string(),
                data: "version=\"1.0\"".to_string(),
            },
            Event::Start(tag("a")),
            Event::Text("t".to_string()),
            Event::End(tag("a").end()),
        ] {
            writer.write_event(&event)?;
        }
        assert_eq!(written(writer), "<?xml version=\"1.0\"?><a>t</a>");
        Ok(())
    }

    #[test]
    fn test_io_error_propagates() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = Writer::new(Broken);
        let err = writer.start_tag(&tag("a")).err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::Io { .. })
        ));
    }
}
