//! Text transformations that make up the sanitization pipeline.
//!
//! Leaves first: `strip` removes control characters, `escape` neutralizes
//! `&`, `<` and `>`, `autolink` turns bare URLs into anchors, and `balancer`
//! consumes the token stream and repairs tag nesting. `compiler` turns
//! validation rules into regexes for the validator.

pub mod autolink;
pub mod balancer;
pub mod compiler;
pub mod escape;
pub mod strip;
