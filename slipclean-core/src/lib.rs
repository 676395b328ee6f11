// slipclean-core/src/lib.rs
//! # slipclean Core Library
//!
//! `slipclean-core` turns untrusted, user-submitted rich text into a bounded
//! safe subset of markup before it is stored or redisplayed. A small
//! allowlist of formatting tags (`a b i s tt em u`) survives as markup when
//! properly paired; everything else is rendered as visible, escaped text.
//! Bare `http`/`https` URLs become anchors.
//!
//! The library performs no I/O while sanitizing and keeps no state between
//! calls: every call builds its own work stack and discards it on return.
//!
//! ## Modules
//!
//! * `config`: `TagPolicy`, `ValidationRule` and `SanitizerConfig`, with YAML loading and merging.
//! * `sanitizers`: the pipeline stages (control stripping, escaping, autolinking, tag balancing)
//!   and the validation rule compiler.
//! * `validators`: the content-policy check run after sanitization.
//! * `engine`: the `SanitizationEngine` trait.
//! * `engines`: concrete engines, currently `AllowlistEngine`.
//! * `headless`: one-shot `sanitize` / `sanitize_and_validate` over a shared default engine.
//! * `errors`: `SlipcleanError` and `Rejection`.
//!
//! ## Usage Example
//!
//! ```rust
//! use slipclean_core::{sanitize, sanitize_and_validate, Rejection};
//!
//! assert_eq!(sanitize("<b>hi</b>"), "<b>hi</b>");
//! assert_eq!(
//!     sanitize("<script>alert(1)</script>"),
//!     "&lt;script&gt;alert(1)&lt;/script&gt;"
//! );
//! assert_eq!(
//!     sanitize("see http://example.com/a now"),
//!     r#"see <a href="http://example.com/a">[url]</a> now"#
//! );
//! assert_eq!(sanitize_and_validate(""), Err(Rejection::Empty));
//! ```
//!
//! ## Error Handling
//!
//! Sanitization is total and never fails. The only content-level failure is
//! a `Rejection` from validation. Loading or compiling a configuration uses
//! `anyhow::Result`, with `SlipcleanError` for rule compilation failures.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod sanitizers;
pub mod validators;

/// Re-exports the configuration types and functions.
pub use config::{
    merge_config,
    validate_config,
    SanitizerConfig,
    TagPolicy,
    ValidationRule,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the error types.
pub use errors::{Rejection, SlipcleanError};

/// Re-exports the engine trait and its implementation.
pub use engine::SanitizationEngine;
pub use engines::allowlist_engine::AllowlistEngine;

/// Re-exports the one-shot entry points.
pub use headless::{default_engine, sanitize, sanitize_and_validate};

/// Re-exports the pipeline stages for callers that compose their own.
pub use sanitizers::autolink::{segments, Segment};
pub use sanitizers::balancer::{OutputUnit, TagBalancer};
pub use sanitizers::escape::escape_text;
pub use sanitizers::strip::strip_control_chars;
pub use validators::Validator;
