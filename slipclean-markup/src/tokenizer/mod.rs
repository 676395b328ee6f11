//! The tokenizer state machine.
//!
//! Lexing follows the conventional HTML tokenizer closely enough that tag,
//! comment and raw-text boundaries land where a browser would put them,
//! without building a tree or decoding entities.

use memchr::memchr;

use crate::attributes::{scan_attribute, AttrStep};
use crate::token::{Token, TokenKind};
use crate::is_tag_whitespace;

const COMMENT_OPEN: &[u8] = b"<!--";
const COMMENT_CLOSE: &[u8] = b"-->";
const DOCTYPE_OPEN: &[u8] = b"<!doctype";

/// Elements whose body is lexed as a single text token up to the matching
/// close tag. `plaintext` has no close tag and runs to end of input.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "textarea",
    "title", "xmp",
];

/// Iterator over the tokens of an HTML fragment.
///
/// `None` marks end of input. Every call to `next` consumes at least one
/// byte, so iteration is linear in the input length.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw_text: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            raw_text: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Emits `start..end` as a token of `kind` and moves past it.
    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.pos = end;
        Token::other(kind, &self.input[start..end])
    }

    /// Emits everything from `start` to end of input as text.
    fn emit_rest_as_text(&mut self, start: usize) -> Token<'a> {
        self.emit(TokenKind::Text, start, self.input.len())
    }

    /// Body of a raw-text element, or `None` if it is empty.
    fn read_raw_text(&mut self, element: &'static str) -> Option<Token<'a>> {
        let start = self.pos;
        let end = if element == "plaintext" {
            self.input.len()
        } else {
            find_raw_text_close(self.bytes(), start, element).unwrap_or(self.input.len())
        };
        (end > start).then(|| self.emit(TokenKind::Text, start, end))
    }

    /// Position just past the `>` at or after `from`, or end of input.
    fn close_angle_or_end(&self, from: usize) -> usize {
        memchr(b'>', &self.bytes()[from..]).map_or(self.input.len(), |i| from + i + 1)
    }

    /// Lexes a start or end tag whose name begins at `name_start`.
    ///
    /// Returns `None` if input ends before the tag is closed.
    fn read_tag(&mut self, kind: TokenKind, lt: usize, name_start: usize) -> Option<Token<'a>> {
        let bytes = self.bytes();
        let mut name_end = name_start;
        while name_end < bytes.len()
            && !is_tag_whitespace(bytes[name_end])
            && !matches!(bytes[name_end], b'/' | b'>')
        {
            name_end += 1;
        }

        let mut cursor = name_end;
        let close = loop {
            match scan_attribute(bytes, cursor) {
                AttrStep::Close(at) => break at,
                AttrStep::Attr { next, .. } => cursor = next,
                AttrStep::Eof => return None,
            }
        };
        let end = close + 1;

        let kind = if kind == TokenKind::StartTag && bytes[close - 1] == b'/' {
            TokenKind::SelfClosingTag
        } else {
            kind
        };
        self.pos = end;
        Some(Token {
            kind,
            raw: &self.input[lt..end],
            name: &self.input[name_start..name_end],
            attrs: &self.input[name_end..end],
        })
    }

    /// Lexes the construct starting with `<` at `lt`.
    fn read_markup(&mut self, lt: usize) -> Token<'a> {
        let bytes = self.bytes();
        match bytes[lt + 1] {
            c if c.is_ascii_alphabetic() => {
                let Some(token) = self.read_tag(TokenKind::StartTag, lt, lt + 1) else {
                    return self.emit_rest_as_text(lt);
                };
                let name = token.name;
                self.raw_text = RAW_TEXT_ELEMENTS
                    .iter()
                    .copied()
                    .find(|element| element.eq_ignore_ascii_case(name));
                token
            }
            b'/' => match bytes.get(lt + 2) {
                None => self.emit_rest_as_text(lt),
                Some(b'>') => self.emit(TokenKind::Comment, lt, lt + 3),
                Some(c) if c.is_ascii_alphabetic() => self
                    .read_tag(TokenKind::EndTag, lt, lt + 2)
                    .unwrap_or_else(|| self.emit_rest_as_text(lt)),
                Some(_) => {
                    let end = self.close_angle_or_end(lt + 2);
                    self.emit(TokenKind::Comment, lt, end)
                }
            },
            b'!' if bytes[lt..].starts_with(COMMENT_OPEN) => {
                // "<!-->" and "<!--->" close immediately.
                let end = find(bytes, lt + 2, COMMENT_CLOSE)
                    .map_or(self.input.len(), |at| at + COMMENT_CLOSE.len());
                self.emit(TokenKind::Comment, lt, end)
            }
            b'!' if starts_with_ignore_ascii_case(&bytes[lt..], DOCTYPE_OPEN) => {
                let end = self.close_angle_or_end(lt + DOCTYPE_OPEN.len());
                self.emit(TokenKind::Doctype, lt, end)
            }
            _ => {
                let end = self.close_angle_or_end(lt + 2);
                self.emit(TokenKind::Comment, lt, end)
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(element) = self.raw_text.take() {
            if let Some(token) = self.read_raw_text(element) {
                return Some(token);
            }
        }

        let bytes = self.bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let mut search = start;
        loop {
            let Some(offset) = memchr(b'<', &bytes[search..]) else {
                return Some(self.emit_rest_as_text(start));
            };
            let lt = search + offset;
            let Some(&next) = bytes.get(lt + 1) else {
                return Some(self.emit_rest_as_text(start));
            };
            if next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?') {
                if lt > start {
                    return Some(self.emit(TokenKind::Text, start, lt));
                }
                return Some(self.read_markup(lt));
            }
            search = lt + 1;
        }
    }
}

fn starts_with_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| from + i)
}

/// Finds `</element` followed by whitespace, `/` or `>`, case-insensitively.
///
/// Returns the index of the `<`.
fn find_raw_text_close(bytes: &[u8], from: usize, element: &str) -> Option<usize> {
    let name = element.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        let lt = i + memchr(b'<', &bytes[i..])?;
        let name_start = lt + 2;
        let after = name_start + name.len();
        if bytes.get(lt + 1) == Some(&b'/')
            && bytes
                .get(name_start..after)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            && bytes
                .get(after)
                .is_some_and(|&c| is_tag_whitespace(c) || c == b'/' || c == b'>')
        {
            return Some(lt);
        }
        i = lt + 1;
    }
    None
}
