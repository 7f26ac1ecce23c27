//! Formatting pass over the generated SDK.

use crate::process::run_checked;
use sdkgen_core::Result;
use sdkgen_core::traits::{ToolInvocation, ToolRunner};
use std::path::Path;
use tracing::info;

/// Runs an import-organizing formatter (`goimports` by default) as
/// `<program> -l -w <output_dir>`.
#[derive(Debug, Clone)]
pub struct Formatter {
    program: String,
}

impl Formatter {
    /// Creates a formatter wrapper for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the invocation. Output is discarded.
    #[must_use]
    pub fn invocation(&self, output_dir: &Path) -> ToolInvocation {
        ToolInvocation::new(&self.program)
            .args(["-l", "-w"])
            .arg(output_dir)
    }

    /// Formats every Go file under `output_dir` in place.
    ///
    /// # Errors
    ///
    /// Returns a subprocess error if the formatter cannot start or exits
    /// non-zero. Files already generated are left as they are.
    pub async fn run(&self, runner: &dyn ToolRunner, output_dir: &Path) -> Result<()> {
        info!("Formatting {}", output_dir.display());
        run_checked(runner, &self.invocation(output_dir)).await
    }
}
