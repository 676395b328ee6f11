// slipclean/src/cli.rs
//! This file defines the command-line interface (CLI) for the slipclean
//! application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "slipclean",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize untrusted rich text",
    long_about = "slipclean reads user-submitted rich text and writes a safe form of it. A small set of formatting tags (a, b, i, s, tt, em, u) is kept when properly paired, bare http/https URLs become links, and everything else is shown as escaped text. By default every input line is sanitized on its own."
)]
pub struct Cli {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Sanitize the whole input as one document instead of line by line.
    #[arg(long, short = 'w', help = "Sanitize the whole input as one document instead of line by line.")]
    pub whole: bool,

    /// Apply the validation rules after sanitizing.
    #[arg(long, help = "Reject empty or disallowed content; exit with status 2 if anything was rejected.")]
    pub validate: bool,

    /// Emit one JSON object per processed unit.
    #[arg(long, short = 'j', help = "Emit one JSON object per processed unit.")]
    pub json: bool,

    /// Path to a custom sanitizer configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "SLIPCLEAN_CONFIG", help = "Path to a custom sanitizer configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly disable these validation rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', value_name = "NAME", help = "Explicitly disable these validation rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Print the effective configuration as YAML and exit.
    #[arg(long = "print-config", help = "Print the effective configuration as YAML and exit.")]
    pub print_config: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn disable_accepts_comma_separated_names() {
        let cli = Cli::try_parse_from(["slipclean", "-x", "timestamp,caps", "--validate"]).unwrap();
        assert_eq!(cli.disable, ["timestamp", "caps"]);
        assert!(cli.validate);
        assert!(!cli.whole);
    }
}
