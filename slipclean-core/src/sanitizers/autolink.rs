//! Detection of bare URLs inside text runs.
//!
//! A text run is split into escaped text and synthesized anchors. The anchor
//! embeds the matched URL verbatim: the pattern already excludes whitespace
//! and `"` so the URL cannot leave its attribute.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use super::escape::escape_text;

/// `http`/`https` (any case), host of `[A-Za-z0-9.-]`, optional port, then
/// `/`-prefixed path segments free of ASCII whitespace and `"`.
///
/// Spelled with explicit ASCII classes so Unicode case folding and Unicode
/// digits/whitespace cannot widen the match.
pub const URL_PATTERN: &str =
    r#"[hH][tT][tT][pP][sS]?://[0-9A-Za-z.\-]+(?::[0-9]+)?(?:/[^\t\n\x0C\r "]*)*/?"#;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"));

/// One piece of a text run, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Unmatched text, to be entity-escaped.
    Text(&'a str),
    /// A matched URL, to be wrapped in an anchor.
    Link(&'a str),
}

impl Segment<'_> {
    /// The output form of this segment.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Segment::Text(text) => escape_text(text),
            Segment::Link(url) => Cow::Owned(format!("<a href=\"{url}\">[url]</a>")),
        }
    }
}

/// Splits `raw` around every non-overlapping URL match, left to right.
///
/// With no match the whole input comes back as a single `Text` segment.
pub fn segments(raw: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in URL_REGEX.find_iter(raw) {
        if start < m.start() {
            out.push(Segment::Text(&raw[start..m.start()]));
        }
        out.push(Segment::Link(m.as_str()));
        start = m.end();
    }
    if start < raw.len() || out.is_empty() {
        out.push(Segment::Text(&raw[start..]));
    }
    out
}
