// slipclean/src/main.rs
//! slipclean entry point.
//!
//! Parses arguments, initializes logging, builds the engine from the
//! effective configuration and runs the filter. Exit status is 0 on success,
//! 1 on error and 2 when `--validate` rejected at least one unit.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use slipclean::cli::Cli;
use slipclean::commands::slipclean::{error_msg, load_effective_config};
use slipclean::logger;
use slipclean::ui::theme::{build_theme_map, ThemeMap, ThemeStyle};
use slipclean::{run_slipclean_opts, RunSummary, SlipcleanOptions};
use slipclean_core::AllowlistEngine;

const EXIT_REJECTED: u8 = 2;

fn run(cli: Cli, theme_map: &ThemeMap) -> Result<RunSummary> {
    let config = load_effective_config(cli.config.as_deref(), &cli.disable)?;

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(RunSummary::default());
    }

    let engine = AllowlistEngine::with_config(config).context("Failed to initialize sanitization engine")?;
    let opts = SlipcleanOptions {
        input_file: cli.input,
        output: cli.output,
        whole: cli.whole,
        validate: cli.validate,
        json: cli.json,
        quiet: cli.quiet,
    };
    run_slipclean_opts(&engine, &opts, theme_map)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let theme_map = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{e:#}"), &ThemeStyle::default_theme_map());
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &theme_map) {
        Ok(summary) if summary.rejected > 0 => ExitCode::from(EXIT_REJECTED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{e:#}"), &theme_map);
            ExitCode::FAILURE
        }
    }
}
