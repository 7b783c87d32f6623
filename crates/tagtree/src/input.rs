//! Documents handed to the decoder, with the name errors are reported under

/// Borrowed XML document plus an optional filename
///
/// The filename never affects decoding. When set, it is attached to any
/// error raised while decoding this document.
#[derive(Clone, Copy, Debug)]
pub struct Input<'a> {
    source: &'a [u8],
    filename: Option<&'a str>,
}

impl<'a> Input<'a> {
    pub const fn from_bytes(source: &'a [u8]) -> Self {
        Self {
            source,
            filename: None,
        }
    }

    pub const fn from_str(source: &'a str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    pub const fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.source
    }

    pub const fn filename(&self) -> Option<&'a str> {
        self.filename
    }

    /// Filename, or `<input>` for anonymous documents
    pub fn display_name(&self) -> &'a str {
        self.filename.unwrap_or("<input>")
    }

    pub const fn len(&self) -> usize {
        self.source.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Tag a decode error with this document's filename
    pub(crate) fn locate(&self, err: crate::Error) -> crate::Error {
        match self.filename {
            Some(filename) => err.with_filename(filename),
            None => err,
        }
    }
}
