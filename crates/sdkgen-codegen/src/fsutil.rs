//! Small filesystem helpers shared by the pipeline stages.

use sdkgen_core::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Creates the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

/// Creates `dir` and any missing ancestors.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::fs(dir, e))
}

/// Writes `contents` to `path`, replacing any previous file.
///
/// Callers render into memory first, so a render failure never truncates
/// an existing file.
pub(crate) fn write_output(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, contents).map_err(|e| Error::fs(path, e))?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Copies `from` over `to`, creating the destination directory.
pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    std::fs::copy(from, to).map_err(|e| Error::fs(to, e))?;
    debug!("Copied {} to {}", from.display(), to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/sdk.go");

        write_output(&path, "first version, longer").unwrap();
        write_output(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_copy_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("sdk.go");
        let to = dir.path().join("lib/go_rsrc/sdk.go");
        std::fs::write(&from, "package dropbox\n").unwrap();

        copy_file(&from, &to).unwrap();
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "package dropbox\n");
    }

    #[test]
    fn test_copy_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("nope"), &dir.path().join("dst")).unwrap_err();
        assert!(err.is_filesystem_error());
    }

    #[test]
    fn test_ensure_parent_of_bare_name() {
        assert!(ensure_parent(Path::new("file.txt")).is_ok());
    }
}
