//! Core types, traits, and errors for the Dropbox Go SDK generator.
//!
//! This crate provides the foundational types shared by the code generation
//! pipeline and the command-line front end.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Configuration types (`GeneratorConfig`, `ParameterBundle`, `Layout`)
//! - The `ToolRunner` trait used for every external process
//! - Strong domain types (`SpecVersion`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub mod cli;
pub mod traits;

pub use config::{
    ConfigFile, DEFAULT_API_VERSION, DEFAULT_DOMAIN, DEFAULT_PACKAGE, DEFAULT_SDK_VERSION,
    GeneratorConfig, Layout, LayoutOverrides, ParameterBundle, SdkOverrides,
};
pub use error::{Error, Result};
pub use types::SpecVersion;
