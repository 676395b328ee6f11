//! Module for managing the colours of slipclean's stderr messages.
//!
//! A theme maps each kind of message to a foreground colour. Only the 16
//! named ANSI colours are supported. Themes are loaded from YAML files and
//! merged over the default theme, so a file only needs the entries it
//! changes.

use anyhow::{Context, Result, bail};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different kinds of stderr output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// General informational messages.
    Info,
    /// Warning messages.
    Warn,
    /// Error messages.
    Error,
    /// A unit rejected by validation.
    Rejected,
    /// The end-of-run summary line.
    Summary,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 5] = [
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Rejected,
        ThemeEntry::Summary,
    ];
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

const NAMED_COLORS: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

fn lookup(name: &str) -> Option<AnsiColors> {
    NAMED_COLORS.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lookup(&lower) {
            Some(_) => Ok(ThemeColor::Named(lower)),
            None => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the colour into its `owo_colors::AnsiColors` value.
    ///
    /// Unknown names fall back to white; `load_from_file` rejects them up front.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => lookup(&name.to_lowercase()).unwrap_or(AnsiColors::White),
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn named(color: &str) -> Self {
        ThemeStyle {
            fg: Some(ThemeColor::Named(color.to_string())),
        }
    }

    /// Loads a theme from a YAML file on disk and merges it over the default theme.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in &custom {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                if name.parse::<ThemeColor>().is_err() {
                    bail!("Theme entry {:?} in {}: {}", entry, path.display(), ParseThemeColorError);
                }
            }
        }

        let mut theme = Self::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }

    /// Returns the default theme map.
    pub fn default_theme_map() -> ThemeMap {
        ThemeMap::from([
            (ThemeEntry::Info, Self::named("white")),
            (ThemeEntry::Warn, Self::named("yellow")),
            (ThemeEntry::Error, Self::named("red")),
            (ThemeEntry::Rejected, Self::named("brightred")),
            (ThemeEntry::Summary, Self::named("brightblack")),
        ])
    }
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}
