//! Strong domain types for the SDK generator.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::SpecVersion;
//!
//! let version = SpecVersion::new("abc123");
//! assert_eq!(version.as_str(), "abc123");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision identifier of the vendored API specification (newtype over String).
///
/// Resolved from version-control metadata on every run and embedded verbatim
/// into the generated root file.
///
/// # Examples
///
/// ```
/// use sdkgen_core::SpecVersion;
///
/// let version = SpecVersion::from("0123abcd");
/// assert_eq!(version.to_string(), "0123abcd");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Creates a new spec version.
    #[inline]
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Returns the version as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SpecVersion {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpecVersion {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
