//! Invocation of the `stone` spec compiler.
//!
//! Each run calls `stone` twice against the same output directory: once with
//! the types generator script, once with the client generator script. Both
//! calls append to the same pair of log files, which are left on disk after a
//! failure for inspection.

use crate::process::run_checked;
use sdkgen_core::traits::{OutputSink, ToolInvocation, ToolRunner};
use sdkgen_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed flags: verbose output, all attributes (`-a :all`).
pub const STONE_FLAGS: [&str; 3] = ["-v", "-a", ":all"];

/// Log files capturing the compiler's standard output and error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    /// Receives standard output.
    pub stdout: PathBuf,
    /// Receives standard error.
    pub stderr: PathBuf,
}

impl LogFiles {
    /// Creates a log pair.
    #[must_use]
    pub fn new(stdout: impl Into<PathBuf>, stderr: impl Into<PathBuf>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Empties both logs, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilesystemError`] if a log cannot be written.
    pub fn truncate(&self) -> Result<()> {
        for path in [&self.stdout, &self.stderr] {
            crate::fsutil::ensure_parent(path)?;
            std::fs::write(path, b"").map_err(|e| Error::fs(path, e))?;
        }
        Ok(())
    }
}

/// Runs `stone` with a fixed flag set and shared log files.
#[derive(Debug, Clone)]
pub struct StoneCompiler {
    program: String,
    logs: LogFiles,
}

impl StoneCompiler {
    /// Creates a compiler wrapper for `program` writing to `logs`.
    #[must_use]
    pub fn new(program: impl Into<String>, logs: LogFiles) -> Self {
        Self {
            program: program.into(),
            logs,
        }
    }

    /// Log files this compiler writes to.
    #[must_use]
    pub const fn logs(&self) -> &LogFiles {
        &self.logs
    }

    /// Builds `stone -v -a :all <script> <output_dir> <spec_files...>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::stone::{LogFiles, StoneCompiler};
    /// use std::path::{Path, PathBuf};
    ///
    /// let stone = StoneCompiler::new("stone", LogFiles::new("out.log", "err.log"));
    /// let invocation = stone.invocation(
    ///     Path::new("go_types.stoneg.py"),
    ///     Path::new("sdk/dropbox"),
    ///     &[PathBuf::from("files.stone")],
    /// );
    /// assert_eq!(
    ///     invocation.to_string(),
    ///     "stone -v -a :all go_types.stoneg.py sdk/dropbox files.stone"
    /// );
    /// ```
    #[must_use]
    pub fn invocation(
        &self,
        script: &Path,
        output_dir: &Path,
        spec_files: &[PathBuf],
    ) -> ToolInvocation {
        ToolInvocation::new(&self.program)
            .args(STONE_FLAGS)
            .arg(script)
            .arg(output_dir)
            .args(spec_files)
            .stdout(OutputSink::AppendTo(self.logs.stdout.clone()))
            .stderr(OutputSink::AppendTo(self.logs.stderr.clone()))
    }

    /// Runs one generator script and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpawnFailed`] or [`Error::SubprocessError`] if
    /// `stone` cannot start or exits non-zero.
    pub async fn generate(
        &self,
        runner: &dyn ToolRunner,
        script: &Path,
        output_dir: &Path,
        spec_files: &[PathBuf],
    ) -> Result<()> {
        info!(
            "Generating with {} ({} spec files)",
            script.display(),
            spec_files.len()
        );
        run_checked(runner, &self.invocation(script, output_dir, spec_files)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sdkgen_core::traits::ToolExit;
    use std::ffi::OsString;
    use std::sync::Mutex;

    struct ScriptedRunner {
        exit: ToolExit,
        seen: Mutex<Vec<ToolInvocation>>,
    }

    #[async_trait]
    impl ToolRunner for ScriptedRunner {
        async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
            self.seen.lock().unwrap().push(invocation.clone());
            Ok(self.exit)
        }
    }

    fn stone() -> StoneCompiler {
        StoneCompiler::new("stone", LogFiles::new("/logs/out.log", "/logs/err.log"))
    }

    #[test]
    fn test_invocation_argument_order() {
        let specs = vec![PathBuf::from("/s/a.stone"), PathBuf::from("/s/b.stone")];
        let invocation = stone().invocation(Path::new("/lib/types.py"), Path::new("/out"), &specs);

        let expected: Vec<OsString> = [
            "-v",
            "-a",
            ":all",
            "/lib/types.py",
            "/out",
            "/s/a.stone",
            "/s/b.stone",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        assert_eq!(invocation.program, "stone");
        assert_eq!(invocation.args, expected);
        assert_eq!(
            invocation.stdout,
            OutputSink::AppendTo(PathBuf::from("/logs/out.log"))
        );
        assert_eq!(
            invocation.stderr,
            OutputSink::AppendTo(PathBuf::from("/logs/err.log"))
        );
    }

    #[test]
    fn test_invocation_with_no_spec_files() {
        let invocation = stone().invocation(Path::new("client.py"), Path::new("out"), &[]);
        assert_eq!(invocation.args.len(), 5);
    }

    #[tokio::test]
    async fn test_generate_success() {
        let runner = ScriptedRunner {
            exit: ToolExit::SUCCESS,
            seen: Mutex::new(Vec::new()),
        };
        stone()
            .generate(&runner, Path::new("types.py"), Path::new("out"), &[])
            .await
            .unwrap();
        assert_eq!(runner.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_nonzero_exit() {
        let runner = ScriptedRunner {
            exit: ToolExit::with_code(1),
            seen: Mutex::new(Vec::new()),
        };
        let err = stone()
            .generate(&runner, Path::new("types.py"), Path::new("out"), &[])
            .await
            .unwrap_err();
        assert!(err.is_subprocess_error());
        assert!(err.to_string().contains("stone"));
    }

    #[test]
    fn test_truncate_logs() {
        let dir = tempfile::tempdir().unwrap();
        let logs = LogFiles::new(dir.path().join("out.log"), dir.path().join("err.log"));
        std::fs::write(&logs.stdout, "stale output").unwrap();

        logs.truncate().unwrap();
        assert_eq!(std::fs::read_to_string(&logs.stdout).unwrap(), "");
        assert!(logs.stderr.exists());
    }
}
