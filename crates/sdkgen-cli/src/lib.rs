//! Dropbox Go SDK generator CLI library.
//!
//! Exposes argument parsing, logging setup, and command handlers so they can
//! be tested without spawning the binary.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

pub mod cli;
pub mod commands;
pub mod runner;
