//! File system utilities.
//!
//! - [`atomic`] - temp-file-and-rename writes
//! - [`dirs`] - directory creation

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, safe_write};
pub use dirs::ensure_dir;
