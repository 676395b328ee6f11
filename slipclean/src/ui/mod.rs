// slipclean/src/ui/mod.rs
//! Terminal presentation: colour theme and stderr message formatting.

pub mod output_format;
pub mod theme;
