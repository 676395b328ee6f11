// slipclean/src/logger.rs
//! Logger setup for the slipclean binary.
//!
//! `RUST_LOG` is honoured when no explicit level is requested. The default
//! filter is `warn` so normal runs keep stderr for user-facing messages.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` once for the process.
///
/// `level` overrides `RUST_LOG` when given. A second initialization is ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(true);
    let _ = builder.try_init();
}

/// Maps the CLI verbosity flags to an explicit level, if any.
///
/// `--quiet` wins over `--debug`.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    match (quiet, debug) {
        (true, _) => Some(LevelFilter::Off),
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}
