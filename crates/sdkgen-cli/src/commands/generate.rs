//! Generate command implementation.
//!
//! Resolves the generator configuration and runs the SDK pipeline:
//! 1. Starts from the built-in defaults
//! 2. Layers the `[sdk]` and `[layout]` tables of the config file, if any
//! 3. Layers the command-line flags
//! 4. Runs every pipeline stage against the repository root

use crate::cli::GenerateArgs;
use anyhow::{Context, Result};
use sdkgen_codegen::{Pipeline, ProcessToolRunner};
use sdkgen_core::cli::ExitCode;
use sdkgen_core::traits::ToolRunner;
use sdkgen_core::{ConfigFile, GeneratorConfig, Layout};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runs the generate command with real child processes.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any pipeline stage
/// fails. The error chain carries the failed stage and its cause.
pub async fn run(args: GenerateArgs) -> Result<ExitCode> {
    run_with(args, &ProcessToolRunner::new()).await
}

/// Runs the generate command with the given tool runner.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with(args: GenerateArgs, runner: &dyn ToolRunner) -> Result<ExitCode> {
    let root = repository_root(args.root.as_deref())?;
    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let (config, layout) = resolve(&args, &file, &root)?;
    debug!("Resolved configuration: {config:?}");
    debug!("Resolved layout: {layout:?}");

    let report = Pipeline::new(&config, &layout, runner).run().await?;
    info!(
        "Done: spec {}, {} files written",
        report.spec_version,
        report.written.len()
    );

    Ok(ExitCode::SUCCESS)
}

/// Layers defaults, the config file, and command-line flags.
///
/// # Errors
///
/// Returns a config error if the resulting parameters are invalid.
pub fn resolve(
    args: &GenerateArgs,
    file: &ConfigFile,
    root: &Path,
) -> Result<(GeneratorConfig, Layout)> {
    let mut config = GeneratorConfig::default();
    file.sdk.apply_to(&mut config);
    args.sdk_overrides().apply_to(&mut config);
    config.validate()?;

    let mut layout = Layout::from_root(root);
    file.layout.apply_to(&mut layout, root);
    args.layout_overrides().apply_to(&mut layout, root);

    Ok((config, layout))
}

fn repository_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}
