//! Atomic file write operations using temp-and-rename strategy.
//!
//! Readers of a file written here see either the old content or the new
//! content, never a partial write. The processed-set cache relies on this so an
//! interrupted run cannot leave a truncated cache behind.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Atomically writes a string to a file.
///
/// Convenience wrapper around [`atomic_write`].
///
/// # Examples
///
/// ```rust,no_run
/// use exif_database::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("exif-database.json"), "{}")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Writes content to a sibling temporary file (`.tmp` extension)
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over the target path
///
/// Parent directories are created when missing.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path).with_context(|| {
            format!(
                "Failed to create temp file: {}\n\nCheck file permissions and that directory exists",
                temp_path.display()
            )
        })?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_safe_write() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("test.json");

        safe_write(&file_path, "{}").unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "{}");
    }

    #[test]
    fn test_safe_write_creates_parent_dirs() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("data").join("exif-database").join("cache.json");

        safe_write(&file_path, "{}").unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_atomic_write_overwrites_and_leaves_no_temp() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("cache.json");

        atomic_write(&file, b"{\"a\":true}").unwrap();
        atomic_write(&file, b"{\"b\":true}").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{\"b\":true}");
        assert!(!temp.path().join("cache.tmp").exists());
    }
}
