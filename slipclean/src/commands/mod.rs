// slipclean/src/commands/mod.rs
pub mod slipclean;
