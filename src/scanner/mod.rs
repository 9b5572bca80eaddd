//! Discovery of raw photo files under a root directory.
//!
//! The walk is recursive, does not follow symlinks, and keeps regular files
//! whose extension equals the requested one exactly. `.ARW` is matched but
//! `.arw` is not.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::ExifDatabaseError;

/// Extension scanned for when none is configured.
pub const DEFAULT_EXTENSION: &str = "ARW";

/// Find every file under `root` with the given extension.
///
/// Results come out in path order, since the walk visits siblings sorted by
/// file name, so runs are reproducible. Entries that cannot
/// be read during the walk (permission errors, races with deletion) are
/// skipped.
///
/// # Errors
///
/// Returns [`ExifDatabaseError::RootNotFound`] when `root` does not exist or
/// is not a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use exif_database::scanner::find_files;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// for path in find_files(Path::new("/photos"), "ARW")? {
///     println!("{}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ExifDatabaseError::RootNotFound {
            path: root.display().to_string(),
        }
        .into());
    }

    debug!("Scanning {} for .{} files", root.display(), extension);

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if has_extension(path, extension) {
            trace!("Found {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    debug!("Found {} .{} files under {}", files.len(), extension, root.display());
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
