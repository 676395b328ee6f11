//! Removal of C0 control characters and DEL before any parsing.

use std::borrow::Cow;

#[inline]
fn is_kept(c: char) -> bool {
    let scalar = c as u32;
    scalar >= 32 && scalar != 127
}

/// Deletes every codepoint below U+0020 and U+007F (DEL).
///
/// Works on Unicode scalar values, so multi-byte characters are never split.
/// Borrows when there is nothing to remove.
pub fn strip_control_chars(input: &str) -> Cow<'_, str> {
    if input.chars().all(is_kept) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|&c| is_kept(c)).collect())
    }
}
