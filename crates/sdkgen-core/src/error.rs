//! Error types for the SDK generator.
//!
//! Every failure in the pipeline is fatal, so the hierarchy is flat: one
//! variant per failure category, each carrying enough context (path, template
//! name, program) to produce a single useful log line.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{Error, Result};
//!
//! fn parse_pointer(contents: &str) -> Result<&str> {
//!     contents
//!         .split_once(':')
//!         .map(|(_, rest)| rest.trim())
//!         .ok_or_else(|| Error::ParseError {
//!             path: "HEAD".into(),
//!             reason: "missing ':' delimiter".to_string(),
//!         })
//! }
//!
//! let err = parse_pointer("deadbeef").unwrap_err();
//! assert!(err.is_parse_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the SDK generator.
///
/// All crates in the workspace report failures through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// A path could not be read, written, copied, or created.
    #[error("Filesystem error at {}: {source}", path.display())]
    FilesystemError {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Version-control metadata did not have the expected shape.
    ///
    /// Raised when the `HEAD` pointer has no `ref:` delimiter or when a
    /// pointer or ref file is empty.
    #[error("Parse error in {}: {reason}", path.display())]
    ParseError {
        /// File that failed to parse
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A template could not be located, compiled, or rendered.
    #[error("Template error in '{template}': {message}")]
    TemplateError {
        /// Name of the template involved
        template: String,
        /// Description of the failure
        message: String,
    },

    /// An external tool could not be started.
    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        /// Program that was being started
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited unsuccessfully.
    ///
    /// `exit_code` is `None` when the process was terminated by a signal.
    #[error("'{program}' exited with {}", describe_exit(*exit_code))]
    SubprocessError {
        /// Program that failed
        program: String,
        /// Exit code reported by the OS
        exit_code: Option<i32>,
    },

    /// Configuration was invalid.
    ///
    /// Covers malformed configuration files and invalid glob patterns.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("exit code {c}"),
    )
}

impl Error {
    /// Builds a [`Error::FilesystemError`] for `path`.
    ///
    /// Convenient as a `map_err` adapter:
    ///
    /// ```
    /// use sdkgen_core::Error;
    /// use std::path::Path;
    ///
    /// let path = Path::new("/definitely/not/here");
    /// let err = std::fs::read_to_string(path)
    ///     .map_err(|e| Error::fs(path, e))
    ///     .unwrap_err();
    /// assert!(err.is_filesystem_error());
    /// ```
    #[must_use]
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            source,
        }
    }

    /// Builds a [`Error::TemplateError`].
    #[must_use]
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateError {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a filesystem error.
    #[must_use]
    pub const fn is_filesystem_error(&self) -> bool {
        matches!(self, Self::FilesystemError { .. })
    }

    /// Returns `true` if this is a version pointer parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::ParseError {
    ///     path: "HEAD".into(),
    ///     reason: "empty".to_string(),
    /// };
    /// assert!(err.is_parse_error());
    /// assert!(!err.is_template_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if an external tool failed to start or exited unsuccessfully.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::SubprocessError {
    ///     program: "stone".to_string(),
    ///     exit_code: Some(1),
    /// };
    /// assert!(err.is_subprocess_error());
    /// ```
    #[must_use]
    pub const fn is_subprocess_error(&self) -> bool {
        matches!(
            self,
            Self::SubprocessError { .. } | Self::SpawnFailed { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }
}

/// Result type alias used throughout the generator.
pub type Result<T> = std::result::Result<T, Error>;
