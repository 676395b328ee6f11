use alloc::borrow::Cow;
use alloc::string::String;

use crate::attributes::Attributes;

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of character data, including raw-text element bodies.
    Text,
    /// `<name ...>`
    StartTag,
    /// `</name ...>`
    EndTag,
    /// `<name .../>`
    SelfClosingTag,
    /// `<!-- ... -->`, and bogus comments such as `<?xml ...>` or `</ >`.
    Comment,
    /// `<!doctype ...>`
    Doctype,
}

/// A single token borrowing from the tokenizer's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) raw: &'a str,
    pub(crate) name: &'a str,
    pub(crate) attrs: &'a str,
}

impl<'a> Token<'a> {
    pub(crate) fn other(kind: TokenKind, raw: &'a str) -> Self {
        Self {
            kind,
            raw,
            name: "",
            attrs: "",
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source slice this token was lexed from.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The tag name, ASCII-lowercased. Empty for non-tag tokens.
    ///
    /// Borrows when the source spelling is already lowercase.
    pub fn tag_name(&self) -> Cow<'a, str> {
        if self.name.bytes().any(|b| b.is_ascii_uppercase()) {
            let mut lowered = String::from(self.name);
            lowered.make_ascii_lowercase();
            Cow::Owned(lowered)
        } else {
            Cow::Borrowed(self.name)
        }
    }

    /// Lazily parses the attributes of a start, end or self-closing tag.
    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(self.attrs)
    }
}
