//! Specification file discovery.

use globset::Glob;
use sdkgen_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists the files directly inside `dir` whose names match `pattern`.
///
/// Results are sorted by file name so the generator always sees the same
/// argument order. A missing directory yields an empty list, like a shell
/// glob that matches nothing. Symlinks to regular files are included;
/// dangling links are skipped.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] for an invalid pattern and
/// [`Error::FilesystemError`] if the directory cannot be listed.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::spec_files::collect_spec_files;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("files.stone"), "")?;
/// std::fs::write(dir.path().join("README.md"), "")?;
///
/// let files = collect_spec_files(dir.path(), "*.stone")?;
/// assert_eq!(files, vec![dir.path().join("files.stone")]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn collect_spec_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)
        .map_err(|e| Error::ConfigError {
            message: format!("invalid spec glob '{pattern}': {e}"),
        })?
        .compile_matcher();

    if !dir.is_dir() {
        warn!("Spec directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::fs(path, e.into())
        })?;

        // Symlinks count when they resolve to a regular file.
        if entry.path().is_file() && matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }

    debug!(
        "Matched {} spec files in {} with '{pattern}'",
        files.len(),
        dir.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "namespace x\n").unwrap();
    }

    #[test]
    fn test_matches_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["users.stone", "files.stone", "auth.stone", "notes.txt"] {
            touch(dir.path(), name);
        }

        let files = collect_spec_files(dir.path(), "*.stone").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["auth.stone", "files.stone", "users.stone"]);
    }

    #[test]
    fn test_does_not_recurse_or_match_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.stone");
        std::fs::create_dir(dir.path().join("nested.stone")).unwrap();
        touch(&dir.path().join("nested.stone"), "inner.stone");

        let files = collect_spec_files(dir.path(), "*.stone").unwrap();
        assert_eq!(files, vec![dir.path().join("top.stone")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_spec_files_are_included() {
        let dir = TempDir::new().unwrap();
        let vendored = dir.path().join("vendored");
        let specs = dir.path().join("specs");
        std::fs::create_dir_all(&vendored).unwrap();
        std::fs::create_dir_all(&specs).unwrap();
        touch(&vendored, "files.stone");
        touch(&specs, "auth.stone");
        std::os::unix::fs::symlink(vendored.join("files.stone"), specs.join("files.stone"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.stone"), specs.join("dangling.stone"))
            .unwrap();

        let files = collect_spec_files(&specs, "*.stone").unwrap();
        assert_eq!(files, vec![specs.join("auth.stone"), specs.join("files.stone")]);
    }

    #[test]
    fn test_empty_match() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "README.md");
        assert!(collect_spec_files(dir.path(), "*.stone").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = collect_spec_files(&dir.path().join("absent"), "*.stone").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let err = collect_spec_files(dir.path(), "[unclosed").unwrap_err();
        assert!(err.is_config_error());
    }
}
