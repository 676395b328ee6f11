// slipclean-markup/src/lib.rs
//! Zero-copy HTML tokenizer used by the slipclean sanitization engine.
//!
//! The tokenizer never allocates for the token stream itself: every token
//! borrows the exact slice of the input it was lexed from. It makes forward
//! progress on every call and therefore terminates on any input.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod attributes;
pub mod token;
pub mod tokenizer;

pub use attributes::{Attribute, Attributes};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;

/// The whitespace set recognised inside tags.
#[inline]
pub(crate) fn is_tag_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t' | 0x0C)
}

/// Index of the first byte at or after `from` that is not tag whitespace.
#[inline]
pub(crate) fn skip_whitespace(bytes: &[u8], mut from: usize) -> usize {
    while from < bytes.len() && is_tag_whitespace(bytes[from]) {
        from += 1;
    }
    from
}
