//! Filesystem utilities.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Remove a file. Returns whether anything was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to remove file: {}", path.display())),
    }
}

/// Directories below `base` matching `pattern`, newest version first.
///
/// Names are compared as dotted numeric versions, so `10.1` sorts ahead of
/// `9.3`. Names that are not versions come last, in descending name order.
/// A missing `base` yields nothing.
pub fn expand_glob_dirs(base: &Path, pattern: &str) -> Vec<PathBuf> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = match glob(&pattern_str) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("invalid glob pattern {}: {}", pattern_str, e);
            return Vec::new();
        }
    };

    let mut results: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("glob error: {}", e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();

    results.sort_by(|a, b| match (dir_version(a), dir_version(b)) {
        (Some(va), Some(vb)) => vb.cmp(&va).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    });
    results.dedup();
    results
}

/// Numeric components of a directory name like `10.1.4`.
fn dir_version(path: &Path) -> Option<Vec<u32>> {
    let name = path.file_name()?.to_str()?;
    name.split('.').map(|part| part.parse().ok()).collect()
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_glob_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("mosek/7")).unwrap();
        fs::create_dir_all(tmp.path().join("mosek/8")).unwrap();
        fs::write(tmp.path().join("mosek/readme.txt"), "readme").unwrap();

        let dirs = expand_glob_dirs(&tmp.path().join("mosek"), "*");
        assert_eq!(
            dirs,
            vec![tmp.path().join("mosek/8"), tmp.path().join("mosek/7")]
        );
    }

    #[test]
    fn test_expand_glob_dirs_orders_versions_numerically() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("mosek");
        for name in ["9.3", "10.1", "10.0", "latest"] {
            fs::create_dir_all(base.join(name)).unwrap();
        }

        let dirs = expand_glob_dirs(&base, "*");
        assert_eq!(
            dirs,
            vec![
                base.join("10.1"),
                base.join("10.0"),
                base.join("9.3"),
                base.join("latest"),
            ]
        );
    }

    #[test]
    fn test_expand_glob_dirs_missing_base() {
        let tmp = TempDir::new().unwrap();
        assert!(expand_glob_dirs(&tmp.path().join("absent"), "*").is_empty());
    }

    #[test]
    fn test_write_and_remove() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/cache.toml");

        write_string(&path, "x = 1\n").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "x = 1\n");

        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!remove_file_if_exists(&path).unwrap());
    }
}
