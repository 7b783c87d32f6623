//! Prefix to namespace-URI bindings, one scope per open element

use crate::lexer::name::is_name_start_char;

pub const XML_PREFIX: &str = "xml";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_PREFIX: &str = "xmlns";

/// Stack of namespace declarations
///
/// Each open element pushes one scope, even when it declares nothing, so
/// popping stays in lockstep with end tags.
#[derive(Clone, Debug, Default)]
pub struct NamespaceStack {
    // (prefix, uri); the empty prefix is the default namespace
    bindings: Vec<(String, String)>,
    scope_starts: Vec<usize>,
}

impl NamespaceStack {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
            scope_starts: Vec::new(),
        }
    }

    /// Open a scope with the given declarations
    pub fn push_scope<I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.scope_starts.push(self.bindings.len());
        self.bindings.extend(declarations);
    }

    /// Close the innermost scope
    pub fn pop_scope(&mut self) {
        if let Some(start) = self.scope_starts.pop() {
            self.bindings.truncate(start);
        }
    }

    /// Resolve a prefix; the empty prefix resolves the default namespace
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == XML_PREFIX {
            return Some(XML_NAMESPACE);
        }
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Current default namespace, empty when none is declared
    pub fn default_namespace(&self) -> &str {
        self.resolve("").unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.scope_starts.len()
    }
}

/// Split `prefix:local` into its parts
pub fn split_qname(qname: &str) -> (&str, &str) {
    match qname.split_once(':') {
        Some((prefix, local))
            if !prefix.is_empty() && local.chars().next().is_some_and(is_name_start_char) =>
        {
            (prefix, local)
        }
        _ => ("", qname),
    }
}

/// Namespace declaration carried by an attribute, as `(prefix, uri)`
pub fn declaration(qname: &str, value: &str) -> Option<(String, String)> {
    if qname == XMLNS_PREFIX {
        return Some((String::new(), value.to_string()));
    }
    match split_qname(qname) {
        (XMLNS_PREFIX, prefix) => Some((prefix.to_string(), value.to_string())),
        _ => None,
    }
}
