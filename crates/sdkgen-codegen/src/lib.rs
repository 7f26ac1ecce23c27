//! Code generation pipeline for the Dropbox Go SDK.
//!
//! Renders the hand-maintained Go files from Handlebars templates, drives the
//! `stone` compiler for the generated types and routes, and runs the
//! formatter over the result.
//!
//! # Architecture
//!
//! - [`version`] resolves the spec revision from git metadata
//! - [`template_engine`] renders the root, auth, and tagged-union files
//! - [`spec_files`] collects the `.stone` inputs
//! - [`stone`] and [`postprocess`] build the external tool invocations
//! - [`process`] runs them as child processes
//! - [`pipeline`] sequences everything into a single run

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod fsutil;

pub mod pipeline;
pub mod postprocess;
pub mod process;
pub mod spec_files;
pub mod stone;
pub mod template_engine;
pub mod version;

pub use pipeline::{GenerationReport, OutputPaths, Pipeline, PipelineError, Stage};
pub use process::ProcessToolRunner;
pub use template_engine::{TemplateEngine, TemplateId};
