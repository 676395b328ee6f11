// slipclean-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The trait is the seam between collaborators that accept user text (post
//! storage, the command-line filter) and the engine that makes it safe. All
//! methods take `&self`: an engine is immutable once built and can be shared
//! across threads without locking.
//!
//! License: MIT OR APACHE 2.0

use crate::config::TagPolicy;
use crate::errors::Rejection;

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Turns untrusted rich text into markup that is safe to store and to
    /// embed in an HTML fragment. Total: never fails, `""` maps to `""`.
    fn sanitize(&self, input: &str) -> String;

    /// Applies the content policy to already-sanitized text.
    fn validate(&self, sanitized: String) -> Result<String, Rejection>;

    /// Sanitizes, then validates the result.
    fn sanitize_and_validate(&self, input: &str) -> Result<String, Rejection> {
        self.validate(self.sanitize(input))
    }

    /// The allowlist this engine enforces.
    fn policy(&self) -> &TagPolicy;
}
