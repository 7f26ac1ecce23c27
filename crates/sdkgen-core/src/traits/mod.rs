//! Core traits for the SDK generator.
//!
//! # Module Structure
//!
//! - `runner` - External tool runner trait and invocation types

mod runner;

pub use runner::{OutputSink, ToolExit, ToolInvocation, ToolRunner};
