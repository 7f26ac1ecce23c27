//! External tool runner trait.
//!
//! Every subprocess the pipeline starts goes through [`ToolRunner`], which
//! takes a program, its arguments, and where its output should go. Tests
//! substitute a recording implementation so no real process is spawned.

use crate::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Destination for one output stream of a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// Output is thrown away.
    #[default]
    Discard,
    /// Output is appended to the file at this path (created if missing).
    AppendTo(PathBuf),
}

/// A single tool invocation: program, argv-style arguments, output sinks.
///
/// Arguments are kept as discrete elements; nothing is ever passed through a
/// shell.
///
/// # Examples
///
/// ```
/// use sdkgen_core::traits::{OutputSink, ToolInvocation};
///
/// let invocation = ToolInvocation::new("goimports")
///     .args(["-l", "-w"])
///     .arg("/repo/sdk/dropbox");
///
/// assert_eq!(invocation.program, "goimports");
/// assert_eq!(invocation.args.len(), 3);
/// assert_eq!(invocation.stdout, OutputSink::Discard);
/// assert_eq!(invocation.to_string(), "goimports -l -w /repo/sdk/dropbox");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program to execute, looked up on `PATH` when not absolute.
    pub program: String,
    /// Arguments as discrete elements.
    pub args: Vec<OsString>,
    /// Where standard output goes.
    pub stdout: OutputSink,
    /// Where standard error goes.
    pub stderr: OutputSink,
}

impl ToolInvocation {
    /// Creates an invocation with no arguments and discarded output.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: OutputSink::Discard,
            stderr: OutputSink::Discard,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the standard output sink.
    #[must_use]
    pub fn stdout(mut self, sink: OutputSink) -> Self {
        self.stdout = sink;
        self
    }

    /// Sets the standard error sink.
    #[must_use]
    pub fn stderr(mut self, sink: OutputSink) -> Self {
        self.stderr = sink;
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a tool finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    /// A zero exit.
    pub const SUCCESS: Self = Self { code: Some(0) };

    /// Creates an exit with the given code.
    #[must_use]
    pub const fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns `true` for exit code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs external tools to completion.
///
/// Implementations block (asynchronously) until the process exits. No
/// timeout is applied.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use sdkgen_core::Result;
/// use sdkgen_core::traits::{ToolExit, ToolInvocation, ToolRunner};
///
/// struct AlwaysSucceeds;
///
/// #[async_trait]
/// impl ToolRunner for AlwaysSucceeds {
///     async fn run(&self, _invocation: &ToolInvocation) -> Result<ToolExit> {
///         Ok(ToolExit::SUCCESS)
///     }
/// }
/// ```
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Runs `invocation` and waits for it to exit.
    ///
    /// A non-zero exit is reported through [`ToolExit`], not as an error;
    /// callers decide whether it is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if an output sink cannot be opened or the process
    /// cannot be spawned.
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        calls: Mutex<Vec<String>>,
        exit: ToolExit,
    }

    #[async_trait]
    impl ToolRunner for Recorder {
        async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
            self.calls.lock().unwrap().push(invocation.to_string());
            Ok(self.exit)
        }
    }

    #[test]
    fn test_invocation_builder() {
        let invocation = ToolInvocation::new("stone")
            .args(["-v", "-a", ":all"])
            .arg("go_types.stoneg.py")
            .stdout(OutputSink::AppendTo("out.log".into()))
            .stderr(OutputSink::AppendTo("err.log".into()));

        assert_eq!(invocation.args.len(), 4);
        assert_eq!(invocation.stdout, OutputSink::AppendTo("out.log".into()));
        assert_eq!(invocation.stderr, OutputSink::AppendTo("err.log".into()));
        assert_eq!(invocation.to_string(), "stone -v -a :all go_types.stoneg.py");
    }

    #[test]
    fn test_tool_exit_success() {
        assert!(ToolExit::SUCCESS.success());
        assert!(!ToolExit::with_code(1).success());
        assert!(!ToolExit { code: None }.success());
    }

    #[tokio::test]
    async fn test_runner_object_safety() {
        let recorder = Recorder {
            calls: Mutex::new(Vec::new()),
            exit: ToolExit::with_code(3),
        };
        let runner: &dyn ToolRunner = &recorder;

        let exit = runner.run(&ToolInvocation::new("true")).await.unwrap();
        assert_eq!(exit.code, Some(3));
        assert_eq!(recorder.calls.lock().unwrap().as_slice(), ["true"]);
    }
}
