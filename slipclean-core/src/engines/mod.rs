// slipclean-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.

pub mod allowlist_engine;
