//! CLI-specific types.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::cli::ExitCode;
//!
//! let code = ExitCode::SUCCESS;
//! assert_eq!(code.as_i32(), 0);
//! assert!(code.is_success());
//! ```

use crate::Error;
use std::fmt;

/// CLI exit code with semantic meaning.
///
/// Success is 0; every failure category maps to its own non-zero code so
/// wrapper scripts can tell a broken checkout from a failing generator.
///
/// # Examples
///
/// ```
/// use sdkgen_core::Error;
/// use sdkgen_core::cli::ExitCode;
///
/// let err = Error::SubprocessError {
///     program: "stone".to_string(),
///     exit_code: Some(1),
/// };
/// assert_eq!(ExitCode::from(&err), ExitCode::SUBPROCESS_ERROR);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid configuration or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Missing or malformed files on disk (exit code 3).
    pub const FILESYSTEM_ERROR: Self = Self(3);

    /// Template lookup, compilation, or rendering failed (exit code 4).
    pub const TEMPLATE_ERROR: Self = Self(4);

    /// External tool failed to start or exited non-zero (exit code 5).
    pub const SUBPROCESS_ERROR: Self = Self(5);

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::FilesystemError { .. } | Error::ParseError { .. } => Self::FILESYSTEM_ERROR,
            Error::TemplateError { .. } => Self::TEMPLATE_ERROR,
            Error::SpawnFailed { .. } | Error::SubprocessError { .. } => Self::SUBPROCESS_ERROR,
            Error::ConfigError { .. } => Self::INVALID_INPUT,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
