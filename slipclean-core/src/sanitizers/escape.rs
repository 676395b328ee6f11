//! Entity escaping for content emitted as literal text.

use std::borrow::Cow;

/// Appends `input` to `out` with `&`, `<` and `>` replaced by entities.
///
/// Equivalent to replacing `&` first, then `<`, then `>`: entities this
/// function introduces are never escaped a second time.
pub fn push_escaped(out: &mut String, input: &str) {
    let mut last = 0;
    for (i, c) in input.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            _ => continue,
        };
        out.push_str(&input[last..i]);
        out.push_str(entity);
        last = i + 1;
    }
    out.push_str(&input[last..]);
}

/// Escapes `&`, `<` and `>`, borrowing when none are present.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    push_escaped(&mut out, input);
    Cow::Owned(out)
}
