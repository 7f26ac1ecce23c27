//! Process-backed [`ToolRunner`].

use crate::fsutil::ensure_parent;
use async_trait::async_trait;
use sdkgen_core::traits::{OutputSink, ToolExit, ToolInvocation, ToolRunner};
use sdkgen_core::{Error, Result};
use std::fs::OpenOptions;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs tools as real child processes.
///
/// Standard input is closed. Each output sink is opened in append mode just
/// before the spawn and closed when the child exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessToolRunner;

impl ProcessToolRunner {
    /// Creates a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
        info!("Running: {invocation}");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(open_sink(&invocation.stdout)?)
            .stderr(open_sink(&invocation.stderr)?)
            .status()
            .await
            .map_err(|source| Error::SpawnFailed {
                program: invocation.program.clone(),
                source,
            })?;

        debug!("'{}' finished with {status}", invocation.program);
        Ok(ToolExit {
            code: status.code(),
        })
    }
}

fn open_sink(sink: &OutputSink) -> Result<Stdio> {
    match sink {
        OutputSink::Discard => Ok(Stdio::null()),
        OutputSink::AppendTo(path) => {
            ensure_parent(path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::fs(path, e))?;
            Ok(Stdio::from(file))
        }
    }
}

/// Runs `invocation` and turns a non-zero exit into an error.
///
/// # Errors
///
/// Propagates runner errors and returns [`Error::SubprocessError`] when the
/// tool exits unsuccessfully.
pub async fn run_checked(runner: &dyn ToolRunner, invocation: &ToolInvocation) -> Result<()> {
    let exit = runner.run(invocation).await?;
    if exit.success() {
        Ok(())
    } else {
        Err(Error::SubprocessError {
            program: invocation.program.clone(),
            exit_code: exit.code,
        })
    }
}
