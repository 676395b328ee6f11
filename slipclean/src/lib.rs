// slipclean/src/lib.rs
//! # slipclean CLI Application
//!
//! This crate provides the command-line filter for the slipclean sanitizer.
//! It reads untrusted rich text from stdin or a file, runs it through
//! `slipclean-core`, and writes the sanitized form to stdout or a file.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::slipclean::{run_slipclean_opts, RunSummary, SlipcleanOptions};
