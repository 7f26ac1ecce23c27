//! Command implementations for the generator CLI.

pub mod completions;
pub mod generate;
