//! The tag balancer: the state machine at the heart of the sanitizer.
//!
//! Tokens are folded into a work stack of [`OutputUnit`]s. Allowed start tags
//! are pushed as open markers and their stack positions are remembered on a
//! second stack. An allowed end tag walks that second stack down to its
//! matching marker, closing it in place and demoting any other open markers
//! found on the way to escaped text. Whatever is still open at end of input
//! is demoted the same way, so only matched pairs of allowed tags survive as
//! markup.
//!
//! Every marker is resolved at most once and no unit is ever copied into
//! another, so the work is linear in the number of tokens. Both stacks are
//! heap allocations, so nesting depth never grows the call stack.

use log::debug;
use slipclean_markup::{Token, TokenKind};
use std::collections::HashMap;
use std::mem;

use super::autolink::segments;
use super::escape::{escape_text, push_escaped};
use crate::config::TagPolicy;

/// An entry on the work stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputUnit {
    /// An allowed start tag still waiting for its end tag.
    OpenMarker {
        /// The reconstructed tag, e.g. `<a href="x">`.
        rendered: String,
        /// Lowercase tag name.
        tag: String,
    },
    /// Finished output, already safe to emit.
    Text(String),
}

/// Folds a token stream into sanitized markup.
///
/// One balancer serves one input; it is consumed by [`TagBalancer::finish`].
#[derive(Debug)]
pub struct TagBalancer<'p> {
    policy: &'p TagPolicy,
    stack: Vec<OutputUnit>,
    /// Indices into `stack` of the markers still open, bottom to top.
    open: Vec<usize>,
    /// Start tags pushed so far, per name. Never decremented: once a name has
    /// been opened, every later end tag of that name searches the open markers.
    opened: HashMap<String, usize>,
    /// Bytes written into units so far.
    #[cfg(test)]
    bytes_written: usize,
}

impl<'p> TagBalancer<'p> {
    pub fn new(policy: &'p TagPolicy) -> Self {
        Self {
            policy,
            stack: Vec::new(),
            open: Vec::new(),
            opened: HashMap::new(),
            #[cfg(test)]
            bytes_written: 0,
        }
    }

    /// Runs a whole token stream through a fresh balancer.
    pub fn balance<'a>(policy: &'p TagPolicy, tokens: impl IntoIterator<Item = Token<'a>>) -> String {
        let mut balancer = Self::new(policy);
        for token in tokens {
            balancer.push_token(&token);
        }
        balancer.finish()
    }

    pub fn push_token(&mut self, token: &Token<'_>) {
        match token.kind() {
            TokenKind::StartTag => self.start_tag(token),
            TokenKind::EndTag => self.end_tag(token),
            TokenKind::Text
            | TokenKind::SelfClosingTag
            | TokenKind::Comment
            | TokenKind::Doctype => self.other(token.raw()),
        }
    }

    fn push(&mut self, unit: OutputUnit) {
        #[cfg(test)]
        {
            self.bytes_written += match &unit {
                OutputUnit::OpenMarker { rendered, .. } => rendered.len(),
                OutputUnit::Text(text) => text.len(),
            };
        }
        self.stack.push(unit);
    }

    fn push_text(&mut self, text: String) {
        self.push(OutputUnit::Text(text));
    }

    /// Replaces the marker at `index` with finished text.
    fn resolve(&mut self, index: usize, text: String) {
        #[cfg(test)]
        {
            self.bytes_written += text.len();
        }
        self.stack[index] = OutputUnit::Text(text);
    }

    fn start_tag(&mut self, token: &Token<'_>) {
        let name = token.tag_name();
        if !self.policy.allows_tag(&name) {
            self.push_text(escape_text(token.raw()).into_owned());
            return;
        }

        // Last occurrence of each retained attribute wins.
        let allowed = self.policy.attributes_for(&name);
        let mut values: Vec<Option<&str>> = vec![None; allowed.len()];
        for attribute in token.attributes() {
            if let Some(slot) = allowed.iter().position(|a| attribute.key_is(a)) {
                values[slot] = Some(attribute.value);
            }
        }

        let mut rendered = format!("<{name}");
        for (key, value) in allowed.iter().zip(values) {
            if let Some(value) = value {
                rendered.push_str(&format!(" {key}=\"{value}\""));
            }
        }
        rendered.push('>');

        *self.opened.entry(name.to_string()).or_default() += 1;
        self.open.push(self.stack.len());
        self.push(OutputUnit::OpenMarker {
            rendered,
            tag: name.into_owned(),
        });
    }

    fn end_tag(&mut self, token: &Token<'_>) {
        let name = token.tag_name();
        let ever_opened = self.opened.get(&*name).is_some_and(|&n| n > 0);
        if !self.policy.allows_tag(&name) || !ever_opened {
            self.push_text(escape_text(token.raw()).into_owned());
            return;
        }

        let close = format!("</{name}>");
        while let Some(index) = self.open.pop() {
            match mem::replace(&mut self.stack[index], OutputUnit::Text(String::new())) {
                OutputUnit::OpenMarker { rendered, tag } if tag == name => {
                    self.resolve(index, rendered);
                    self.push_text(close);
                    return;
                }
                OutputUnit::OpenMarker { rendered, tag } => {
                    debug!("Flattening <{}> left open inside </{}>.", tag, name);
                    self.resolve(index, escape_text(&rendered).into_owned());
                }
                // `open` only ever indexes markers.
                text @ OutputUnit::Text(_) => self.stack[index] = text,
            }
        }

        debug!("No open <{}> left on the stack; closing tag kept as text.", name);
        self.push_text(escape_text(&close).into_owned());
    }

    fn other(&mut self, raw: &str) {
        for segment in segments(raw) {
            self.push_text(segment.render().into_owned());
        }
    }

    /// Drains the stack, demoting unclosed markers to escaped text.
    pub fn finish(self) -> String {
        let mut out = String::new();
        for unit in self.stack {
            match unit {
                OutputUnit::OpenMarker { rendered, tag } => {
                    debug!("Flattening unclosed <{}> at end of input.", tag);
                    push_escaped(&mut out, &rendered);
                }
                OutputUnit::Text(text) => out.push_str(&text),
            }
        }
        out
    }
}
