// slipclean/src/ui/output_format.rs
//! Formatting of user-facing stderr messages.
//!
//! Every printer takes the writer, the theme and whether colour is enabled,
//! so callers decide once (usually by checking whether stderr is a
//! terminal) and tests can capture plain output.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use super::theme::{ThemeEntry, ThemeMap};

fn print_styled<W: Write>(
    writer: &mut W,
    entry: ThemeEntry,
    text: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let color = theme.get(&entry).and_then(|style| style.fg.as_ref());
    match color {
        Some(color) if enable_colors => writeln!(writer, "{}", text.color(color.to_ansi_color())),
        _ => writeln!(writer, "{}", text),
    }
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, ThemeEntry::Info, msg, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, ThemeEntry::Warn, &format!("Warning: {msg}"), theme, enable_colors)
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(writer, ThemeEntry::Error, &format!("Error: {msg}"), theme, enable_colors)
}

/// `line N rejected: <reason>`
pub fn print_rejection_message<W: Write>(
    writer: &mut W,
    line: usize,
    reason: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(
        writer,
        ThemeEntry::Rejected,
        &format!("line {line} rejected: {reason}"),
        theme,
        enable_colors,
    )
}

pub fn print_summary_line<W: Write>(
    writer: &mut W,
    processed: usize,
    rejected: usize,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    print_styled(
        writer,
        ThemeEntry::Summary,
        &format!("processed {processed}, rejected {rejected}"),
        theme,
        enable_colors,
    )
}
