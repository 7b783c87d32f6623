//! Pull-based XML tokenizer

use crate::error::{Error, ErrorKind, Pos, Result};
use crate::lexer::name::{is_name, is_name_byte};
use crate::lexer::Cursor;
use crate::reader::event::{Attribute, EndTag, Event, Name, StartTag};
use crate::reader::namespace::{self, NamespaceStack};

/// Configuration for the XML reader
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Streaming XML reader
///
/// Yields one [`Event`] per call to [`Reader::next_event`] and `None` once the
/// input is exhausted. Running out of input with elements still open is not an
/// error here; callers decide what an unclosed element means.
#[derive(Debug)]
pub struct Reader<'a> {
    cursor: Cursor<'a>,
    input_len: usize,
    config: Config,
    /// Raw qualified names of open elements, innermost last
    open: Vec<String>,
    namespaces: NamespaceStack,
    /// End half of a self-closing tag, delivered on the next call
    pending_end: Option<EndTag>,
}

impl<'a> Reader<'a> {
    /// Create a new reader with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new reader with custom configuration
    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            input_len: input.len(),
            config,
            open: Vec::new(),
            namespaces: NamespaceStack::new(),
            pending_end: None,
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Current position in the input
    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    /// Get the next event from the reader
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        if self.config.max_size > 0 && self.input_len > self.config.max_size {
            return Err(self.error_here(ErrorKind::MaxSizeExceeded {
                max: self.config.max_size,
            }));
        }

        if let Some(end) = self.pending_end.take() {
            self.close_element();
            return Ok(Some(Event::End(end)));
        }

        if self.cursor.is_eof() {
            return Ok(None);
        }

        if self.cursor.current() != Some(b'<') {
            return self.read_text().map(Some);
        }

        let event = if self.cursor.starts_with(b"<!--") {
            self.read_comment()?
        } else if self.cursor.starts_with(b"<![CDATA[") {
            self.read_cdata()?
        } else if self.cursor.starts_with(b"<!") {
            self.read_directive()?
        } else if self.cursor.starts_with(b"<?") {
            self.read_processing_instruction()?
        } else if self.cursor.starts_with(b"</") {
            self.read_end_tag()?
        } else {
            self.read_start_tag()?
        };
        Ok(Some(event))
    }

    fn read_start_tag(&mut self) -> Result<Event> {
        let start_pos = self.cursor.position();
        self.cursor.advance();
        let qname = self.parse_name()?;

        let mut raw_attrs: Vec<(String, String)> = Vec::new();
        let self_closing = loop {
            let had_space = self.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') => {
                    self.cursor.advance();
                    self.expect_byte(b'>', "'>'")?;
                    break true;
                }
                Some(b'>') => {
                    self.cursor.advance();
                    break false;
                }
                Some(_) if !had_space => {
                    return Err(self.unexpected("whitespace, '/>' or '>'"));
                }
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnterminatedMarkup)),
            }

            let attr_pos = self.cursor.position();
            let name = self.parse_name()?;
            self.skip_whitespace();
            self.expect_byte(b'=', "'='")?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if raw_attrs.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::at(ErrorKind::DuplicateAttribute { name }, attr_pos));
            }
            raw_attrs.push((name, value));
        };

        if self.config.max_depth > 0 && self.open.len() >= usize::from(self.config.max_depth) {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                start_pos,
            ));
        }

        self.namespaces.push_scope(
            raw_attrs
                .iter()
                .filter_map(|(name, value)| namespace::declaration(name, value)),
        );

        let name = self.resolve_element_name(&qname);
        let attributes = raw_attrs
            .into_iter()
            .map(|(qname, value)| Attribute::new(self.resolve_attribute_name(&qname), value))
            .collect();
        self.open.push(qname);

        let start = StartTag { name, attributes };
        if self_closing {
            self.pending_end = Some(start.end());
        }
        Ok(Event::Start(start))
    }

    fn read_end_tag(&mut self) -> Result<Event> {
        let start_pos = self.cursor.position();
        self.cursor.advance_by(2);
        let qname = self.parse_name()?;
        self.skip_whitespace();
        self.expect_byte(b'>', "'>'")?;

        match self.open.last() {
            Some(open) if *open == qname => {}
            Some(open) => {
                return Err(Error::at(
                    ErrorKind::MismatchedTag {
                        expected: open.clone(),
                        found: qname,
                    },
                    start_pos,
                ));
            }
            None => {
                return Err(Error::at(
                    ErrorKind::UnexpectedEndTag { name: qname },
                    start_pos,
                ));
            }
        }

        // resolve before the element's own declarations go out of scope
        let name = self.resolve_element_name(&qname);
        self.close_element();
        Ok(Event::End(EndTag { name }))
    }

    fn read_text(&mut self) -> Result<Event> {
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let text = bytes_to_string(self.cursor.slice_from(start), start_pos)?;
        decode_entities(&text, start_pos).map(Event::Text)
    }

    fn read_comment(&mut self) -> Result<Event> {
        self.cursor.advance_by(4);
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here(ErrorKind::UnterminatedMarkup));
            }
            if self.cursor.starts_with(b"--") {
                if self.cursor.peek(2) != Some(b'>') {
                    return Err(self.unexpected("'-->' after '--' in comment"));
                }
                break;
            }
            self.cursor.advance();
        }
        let body = bytes_to_string(self.cursor.slice_from(start), start_pos)?;
        self.cursor.advance_by(3);
        Ok(Event::Comment(body))
    }

    fn read_cdata(&mut self) -> Result<Event> {
        self.cursor.advance_by(9);
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        let raw = self.take_until(b"]]>", start)?;
        bytes_to_string(raw, start_pos).map(Event::Text)
    }

    fn read_directive(&mut self) -> Result<Event> {
        self.cursor.advance_by(2);
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        // an internal DTD subset may contain '>' inside brackets or quotes
        let mut brackets = 0usize;
        let mut quote: Option<u8> = None;
        loop {
            let Some(b) = self.cursor.current() else {
                return Err(self.error_here(ErrorKind::UnterminatedMarkup));
            };
            match (quote, b) {
                (Some(q), b) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => brackets += 1,
                (None, b']') => brackets = brackets.saturating_sub(1),
                (None, b'>') if brackets == 0 => break,
                _ => {}
            }
            self.cursor.advance();
        }
        let body = bytes_to_string(self.cursor.slice_from(start), start_pos)?;
        self.cursor.advance();
        Ok(Event::Directive(body))
    }

    fn read_processing_instruction(&mut self) -> Result<Event> {
        self.cursor.advance_by(2);
        let target = self.parse_name()?;
        self.skip_whitespace();
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        let raw = self.take_until(b"?>", start)?;
        let data = bytes_to_string(raw, start_pos)?;
        Ok(Event::ProcessingInstruction { target, data })
    }

    /// Consume through `pattern`, returning the bytes before it
    fn take_until(&mut self, pattern: &[u8], start: usize) -> Result<&'a [u8]> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(pattern.len());
                return Ok(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.unexpected("quoted attribute value")),
        };
        self.cursor.advance();

        let start_pos = self.cursor.position();
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw, start_pos)?;
                return decode_entities(&text, start_pos);
            }
            if b == b'<' {
                return Err(self.unexpected("attribute value without '<'"));
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(b) if is_name_byte(b) && !matches!(b, b'0'..=b'9' | b'-' | b'.') => {
                self.cursor.advance();
            }
            Some(_) => return Err(self.unexpected("name")),
            None => return Err(self.error_here(ErrorKind::UnterminatedMarkup)),
        }
        while let Some(b) = self.cursor.current() {
            if is_name_byte(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let name = bytes_to_string(self.cursor.slice_from(start), start_pos)?;
        if !is_name(&name) {
            return Err(Error::at(ErrorKind::InvalidName { name }, start_pos));
        }
        Ok(name)
    }

    fn resolve_element_name(&self, qname: &str) -> Name {
        let (prefix, local) = namespace::split_qname(qname);
        let space = match self.namespaces.resolve(prefix) {
            Some(uri) => uri.to_string(),
            // unbound prefixes are kept verbatim
            None => prefix.to_string(),
        };
        Name::new(space, local)
    }

    fn resolve_attribute_name(&self, qname: &str) -> Name {
        match namespace::split_qname(qname) {
            ("", local) => Name::local(local),
            ("xmlns", local) => Name::new("xmlns", local),
            (prefix, local) => {
                let space = self.namespaces.resolve(prefix).unwrap_or(prefix);
                Name::new(space, local)
            }
        }
    }

    fn close_element(&mut self) {
        self.open.pop();
        self.namespaces.pop_scope();
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.cursor.pos();
        self.cursor.skip_whitespace();
        self.cursor.pos() != before
    }

    fn expect_byte(&mut self, expected: u8, label: &str) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.unexpected(label))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        let found = match self.cursor.current() {
            Some(b) if b.is_ascii_graphic() => format!("'{}'", char::from(b)),
            Some(b) => format!("byte 0x{b:02x}"),
            None => "EOF".to_string(),
        };
        self.error_here(ErrorKind::Expected {
            expected: expected.to_string(),
            found,
        })
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position())
    }
}

fn bytes_to_string(bytes: &[u8], pos: Pos) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| Error::at(ErrorKind::InvalidUtf8, pos))
}

fn decode_entities(input: &str, pos: Pos) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);

        let Some(semi) = after.find(';') else {
            return Err(Error::at(
                ErrorKind::InvalidEntity {
                    entity: after.trim_start_matches('&').to_string(),
                },
                pos,
            ));
        };
        let entity = after.get(1..semi).unwrap_or_default();

        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                return Err(Error::at(
                    ErrorKind::InvalidEntity {
                        entity: entity.to_string(),
                    },
                    pos,
                ));
            }
        }
        rest = after.get(semi + 1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let (digits, radix) = match entity.strip_prefix("#x") {
        Some(hex) => (hex, 16),
        None => (entity.strip_prefix('#')?, 10),
    };
    // digits only, no sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok().and_then(char::from_u32)
}
