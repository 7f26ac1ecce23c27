//! Specification version resolution.
//!
//! The API spec is vendored as a git submodule. Its current revision is read
//! straight from the submodule's metadata directory: `HEAD` holds a pointer
//! such as `ref: refs/heads/main`, and the file that pointer names holds the
//! commit hash.

use sdkgen_core::{Error, Result, SpecVersion};
use std::path::{Component, Path};
use tracing::debug;

/// Name of the pointer file inside a git metadata directory.
pub const HEAD_FILE: &str = "HEAD";

/// Resolves the spec revision from a git metadata directory.
///
/// # Errors
///
/// - [`Error::FilesystemError`] if `HEAD` or the ref it names cannot be read
/// - [`Error::ParseError`] if `HEAD` has no `:` delimiter, names an empty or
///   escaping ref, or the ref file is empty
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::version::resolve_spec_version;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::create_dir_all(dir.path().join("refs/heads"))?;
/// std::fs::write(dir.path().join("HEAD"), "ref: refs/heads/main\n")?;
/// std::fs::write(dir.path().join("refs/heads/main"), "abc123\n")?;
///
/// let version = resolve_spec_version(dir.path())?;
/// assert_eq!(version.as_str(), "abc123");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve_spec_version(git_dir: &Path) -> Result<SpecVersion> {
    let head_path = git_dir.join(HEAD_FILE);
    let head = std::fs::read_to_string(&head_path).map_err(|e| Error::fs(&head_path, e))?;

    let ref_name = parse_head_pointer(&head).map_err(|reason| Error::ParseError {
        path: head_path.clone(),
        reason,
    })?;
    debug!("Spec HEAD points at {ref_name}");

    let ref_path = git_dir.join(ref_name);
    let revision = std::fs::read_to_string(&ref_path).map_err(|e| Error::fs(&ref_path, e))?;
    let revision = revision.trim();
    if revision.is_empty() {
        return Err(Error::ParseError {
            path: ref_path,
            reason: "ref file is empty".to_string(),
        });
    }

    Ok(SpecVersion::new(revision))
}

/// Extracts the ref path from the contents of a `HEAD` file.
///
/// The ref is the trimmed text after the first `:`. It must be a relative
/// path that stays inside the metadata directory.
fn parse_head_pointer(contents: &str) -> std::result::Result<&str, String> {
    let (_, rest) = contents
        .split_once(':')
        .ok_or_else(|| "expected 'ref: <path>' but found no ':' delimiter".to_string())?;

    let ref_name = rest.trim();
    if ref_name.is_empty() {
        return Err("pointer names an empty ref".to_string());
    }

    let escapes = Path::new(ref_name)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(format!("ref '{ref_name}' must be a relative path inside the git directory"));
    }

    Ok(ref_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_dir(head: &str, refs: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(HEAD_FILE), head).unwrap();
        for (name, contents) in refs {
            let path = dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_resolves_trimmed_revision() {
        let dir = git_dir(
            "ref: refs/heads/main\n",
            &[("refs/heads/main", "  0f1e2d3c4b5a\n\n")],
        );
        let version = resolve_spec_version(dir.path()).unwrap();
        assert_eq!(version.as_str(), "0f1e2d3c4b5a");
    }

    #[test]
    fn test_pointer_whitespace_is_ignored() {
        let dir = git_dir("ref:   refs/heads/release  \r\n", &[("refs/heads/release", "abc")]);
        assert_eq!(resolve_spec_version(dir.path()).unwrap().as_str(), "abc");
    }

    #[test]
    fn test_detached_head_is_parse_error() {
        let dir = git_dir("0f1e2d3c4b5a\n", &[]);
        let err = resolve_spec_version(dir.path()).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_empty_pointer_is_parse_error() {
        let dir = git_dir("ref:\n", &[]);
        assert!(resolve_spec_version(dir.path()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_escaping_pointer_is_parse_error() {
        for head in ["ref: ../../etc/passwd", "ref: /etc/passwd"] {
            let dir = git_dir(head, &[]);
            let err = resolve_spec_version(dir.path()).unwrap_err();
            assert!(err.is_parse_error(), "{head} should be rejected");
        }
    }

    #[test]
    fn test_missing_head_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = resolve_spec_version(dir.path()).unwrap_err();
        assert!(err.is_filesystem_error());
        assert!(err.to_string().contains("HEAD"));
    }

    #[test]
    fn test_missing_ref_is_filesystem_error() {
        let dir = git_dir("ref: refs/heads/gone\n", &[]);
        let err = resolve_spec_version(dir.path()).unwrap_err();
        assert!(err.is_filesystem_error());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_empty_ref_is_parse_error() {
        let dir = git_dir("ref: refs/heads/main", &[("refs/heads/main", "\n")]);
        assert!(resolve_spec_version(dir.path()).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_resolution_is_not_cached() {
        let dir = git_dir("ref: refs/heads/main", &[("refs/heads/main", "first")]);
        assert_eq!(resolve_spec_version(dir.path()).unwrap().as_str(), "first");

        std::fs::write(dir.path().join("refs/heads/main"), "second").unwrap();
        assert_eq!(resolve_spec_version(dir.path()).unwrap().as_str(), "second");
    }
}
