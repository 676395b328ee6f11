//! The slipclean filter: reads untrusted text, writes its sanitized form.
//!
//! Input is processed one line at a time by default, each line being an
//! independent document. `--whole` treats the entire input as one document.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use slipclean_core::config::{merge_config, SanitizerConfig};
use slipclean_core::{Rejection, SanitizationEngine};

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Options for the ergonomic `run_slipclean_opts` API
#[derive(Debug, Clone, Default)]
pub struct SlipcleanOptions {
    pub input_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub whole: bool,
    pub validate: bool,
    pub json: bool,
    pub quiet: bool,
}

/// Counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub rejected: usize,
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct UnitReport<'a> {
    line: usize,
    #[serde(flatten)]
    outcome: Outcome<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome<'a> {
    Accepted {
        text: &'a str,
    },
    Rejected {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rule: Option<&'a str>,
    },
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Builds the configuration for this run: embedded defaults, then the
/// optional user file merged over them, then `disable`.
pub fn load_effective_config(config_path: Option<&Path>, disable: &[String]) -> Result<SanitizerConfig> {
    let defaults = SanitizerConfig::load_default()?;
    let user = config_path
        .map(SanitizerConfig::load_from_file)
        .transpose()
        .context("Failed to load user configuration")?;

    let mut config = merge_config(defaults, user);
    if !disable.is_empty() {
        config.disable_rules(disable);
    }
    Ok(config)
}

/// Writes per-unit results and tallies them.
struct UnitWriter<'a, W: Write, E: Write> {
    engine: &'a dyn SanitizationEngine,
    out: W,
    diag: E,
    validate: bool,
    json: bool,
    theme: &'a ThemeMap,
    diag_colors: bool,
    summary: RunSummary,
}

impl<W: Write, E: Write> UnitWriter<'_, W, E> {
    fn unit(&mut self, line: usize, input: &str) -> Result<()> {
        self.summary.processed += 1;
        let outcome = if self.validate {
            self.engine.sanitize_and_validate(input)
        } else {
            Ok(self.engine.sanitize(input))
        };

        match outcome {
            Ok(text) => self.accepted(line, &text),
            Err(rejection) => {
                self.summary.rejected += 1;
                debug!("Line {} rejected: {}", line, rejection);
                self.rejected(line, &rejection)
            }
        }
    }

    fn accepted(&mut self, line: usize, text: &str) -> Result<()> {
        if self.json {
            self.write_report(UnitReport {
                line,
                outcome: Outcome::Accepted { text },
            })
        } else {
            writeln!(self.out, "{}", text).context("Failed to write output")
        }
    }

    fn rejected(&mut self, line: usize, rejection: &Rejection) -> Result<()> {
        if self.json {
            self.write_report(UnitReport {
                line,
                outcome: Outcome::Rejected {
                    reason: rejection.to_string(),
                    rule: rejection.rule(),
                },
            })
        } else {
            output_format::print_rejection_message(
                &mut self.diag,
                line,
                &rejection.to_string(),
                self.theme,
                self.diag_colors,
            )
            .context("Failed to write diagnostics")
        }
    }

    fn write_report(&mut self, report: UnitReport<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &report).context("Failed to serialize JSON report")?;
        writeln!(self.out).context("Failed to write output")
    }
}

/// Runs the filter over `reader`, writing results to `out` and rejections
/// (outside JSON mode) to `diag`.
pub fn process_stream<R: BufRead, W: Write, E: Write>(
    engine: &dyn SanitizationEngine,
    mut reader: R,
    out: W,
    diag: E,
    opts: &SlipcleanOptions,
    theme: &ThemeMap,
    diag_colors: bool,
) -> Result<RunSummary> {
    let mut writer = UnitWriter {
        engine,
        out,
        diag,
        validate: opts.validate,
        json: opts.json,
        theme,
        diag_colors,
        summary: RunSummary::default(),
    };

    let mut buf = Vec::new();
    if opts.whole {
        reader.read_to_end(&mut buf).context("Failed to read input")?;
        writer.unit(1, &String::from_utf8_lossy(&buf))?;
    } else {
        let mut line = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).context("Failed to read input")? == 0 {
                break;
            }
            line += 1;
            // The terminator is a control character and is stripped with the rest.
            writer.unit(line, &String::from_utf8_lossy(&buf))?;
        }
    }

    writer.out.flush().context("Failed to flush output")?;
    Ok(writer.summary)
}

/// The main operation runner for the slipclean CLI.
pub fn run_slipclean_opts(
    engine: &dyn SanitizationEngine,
    opts: &SlipcleanOptions,
    theme_map: &ThemeMap,
) -> Result<RunSummary> {
    info!("Starting slipclean operation.");

    let reader: Box<dyn BufRead> = match &opts.input_file {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match &opts.output {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing sanitized content to file: {}", path.display()), theme_map);
            }
            Box::new(
                fs::File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            )
        }
        None => Box::new(io::stdout().lock()),
    };

    let stderr = io::stderr();
    let diag_colors = stderr.is_terminal();
    let summary = process_stream(
        engine,
        reader,
        BufWriter::new(writer),
        stderr.lock(),
        opts,
        theme_map,
        diag_colors,
    )?;

    if opts.validate && !opts.quiet {
        output_format::print_summary_line(
            &mut io::stderr(),
            summary.processed,
            summary.rejected,
            theme_map,
            diag_colors,
        )
        .context("Failed to write summary")?;
    }

    info!(
        "slipclean operation completed: {} processed, {} rejected.",
        summary.processed, summary.rejected
    );
    Ok(summary)
}
