use core::ops::Range;

use memchr::memchr;

use crate::{is_tag_whitespace, skip_whitespace};

/// One `key[=value]` pair inside a tag.
///
/// Both fields borrow the source. The value is the text between the quotes
/// (or the unquoted run) with no entity decoding; it is empty when the
/// attribute has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl Attribute<'_> {
    /// Attribute names are ASCII case-insensitive.
    pub fn key_is(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// Result of scanning one step of a tag's attribute area.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AttrStep {
    /// The closing `>` sits at this index.
    Close(usize),
    /// An attribute (possibly with an empty key, which callers skip).
    Attr {
        key: Range<usize>,
        value: Option<Range<usize>>,
        next: usize,
    },
    /// Input ended before the tag was closed.
    Eof,
}

/// Scans one attribute starting at `at`.
///
/// A `/` or whitespace ends a key and is consumed. `=` is accepted as the
/// first character of a key. Every `Attr` step advances `next` past `at`.
pub(crate) fn scan_attribute(bytes: &[u8], at: usize) -> AttrStep {
    let mut pos = skip_whitespace(bytes, at);
    if pos >= bytes.len() {
        return AttrStep::Eof;
    }
    if bytes[pos] == b'>' {
        return AttrStep::Close(pos);
    }

    let key_start = pos;
    let key_end;
    loop {
        let Some(&c) = bytes.get(pos) else {
            return AttrStep::Eof;
        };
        if is_tag_whitespace(c) || c == b'/' {
            key_end = pos;
            pos += 1;
            break;
        }
        if c == b'>' || (c == b'=' && pos != key_start) {
            key_end = pos;
            break;
        }
        pos += 1;
    }
    let key = key_start..key_end;

    let eq = skip_whitespace(bytes, pos);
    if eq >= bytes.len() {
        return AttrStep::Eof;
    }
    if bytes[eq] != b'=' {
        return AttrStep::Attr { key, value: None, next: eq };
    }

    let value_start = skip_whitespace(bytes, eq + 1);
    let Some(&first) = bytes.get(value_start) else {
        return AttrStep::Eof;
    };
    if first == b'"' || first == b'\'' {
        let inner = value_start + 1;
        match memchr(first, &bytes[inner..]) {
            Some(offset) => AttrStep::Attr {
                key,
                value: Some(inner..inner + offset),
                next: inner + offset + 1,
            },
            None => AttrStep::Eof,
        }
    } else {
        let mut end = value_start;
        while end < bytes.len() && !is_tag_whitespace(bytes[end]) && bytes[end] != b'>' {
            end += 1;
        }
        if end >= bytes.len() {
            return AttrStep::Eof;
        }
        AttrStep::Attr {
            key,
            value: Some(value_start..end),
            next: end,
        }
    }
}

/// Lazy iterator over the attributes of a tag.
///
/// Attributes are yielded in source order; duplicates are not collapsed.
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Attributes<'a> {
    /// `src` is the part of a tag after its name, through the closing `>`.
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();
        loop {
            match scan_attribute(bytes, self.pos) {
                AttrStep::Close(_) | AttrStep::Eof => {
                    self.pos = bytes.len();
                    return None;
                }
                AttrStep::Attr { key, value, next } => {
                    self.pos = next;
                    if key.is_empty() {
                        continue;
                    }
                    return Some(Attribute {
                        key: &self.src[key],
                        value: value.map_or("", |range| &self.src[range]),
                    });
                }
            }
        }
    }
}
