//! errors.rs - Custom error types for the slipclean-core library.
//!
//! Two families live here: `SlipcleanError` for configuration and rule
//! compilation failures, and `Rejection` for content-policy decisions made
//! by the validator. Sanitization itself has no error path.
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;
use thiserror::Error;

/// This enum represents the configuration-time failures of the library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SlipcleanError {
    #[error("Failed to compile validation rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

/// A content-policy rejection produced by the validator.
///
/// The `Display` form is the client-visible reason. Callers that accept posts
/// are expected to surface it as a bad-request style error rather than store
/// the input.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    #[error("empty input not accepted")]
    Empty,

    #[error("{reason}")]
    DisallowedContent { rule: String, reason: String },
}

impl Rejection {
    /// Name of the rule that fired, if the rejection came from a pattern rule.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Rejection::Empty => None,
            Rejection::DisallowedContent { rule, .. } => Some(rule),
        }
    }
}
