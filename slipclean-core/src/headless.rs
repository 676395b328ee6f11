// File: slipclean-core/src/headless.rs

//! `headless.rs`
//! One-shot entry points backed by a process-wide default engine.
//!
//! The default engine is built once, on first use, from the built-in
//! allowlist and rules. It is immutable afterwards and shared by reference,
//! so concurrent callers need no synchronization.

use once_cell::sync::Lazy;

use crate::engine::SanitizationEngine;
use crate::engines::allowlist_engine::AllowlistEngine;
use crate::errors::Rejection;

static DEFAULT_ENGINE: Lazy<AllowlistEngine> =
    Lazy::new(|| AllowlistEngine::new().expect("built-in sanitizer configuration is valid"));

/// The shared engine used by [`sanitize`] and [`sanitize_and_validate`].
pub fn default_engine() -> &'static AllowlistEngine {
    &DEFAULT_ENGINE
}

/// Sanitizes untrusted rich text with the built-in allowlist.
///
/// Total: never fails, and returns `""` for `""`.
pub fn sanitize(input: &str) -> String {
    default_engine().sanitize(input)
}

/// Sanitizes with the built-in allowlist, then applies the built-in content
/// rules. The `Err` carries the client-visible rejection reason.
pub fn sanitize_and_validate(input: &str) -> Result<String, Rejection> {
    default_engine().sanitize_and_validate(input)
}
