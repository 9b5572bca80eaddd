//! Configuration and user-scoped locations for exif-database.
//!
//! - [`Settings`] - layered runtime settings (defaults, TOML file, environment)
//! - [`default_config_path`] - where the settings file is looked up
//! - [`default_cache_path`] - where the processed-set cache lives
//!
//! # Locations
//!
//! | File | Linux | macOS | Windows |
//! |------|-------|-------|---------|
//! | Settings | `~/.config/exif-database/config.toml` | `~/Library/Application Support/exif-database/config.toml` | `%APPDATA%\exif-database\config.toml` |
//! | Cache | `~/.local/share/exif-database/exif-database.json` | `~/Library/Application Support/exif-database/exif-database.json` | `%APPDATA%\exif-database\exif-database.json` |

mod settings;

pub use settings::{
    CACHE_PATH_ENV, CONFIG_PATH_ENV, CacheSettings, EXIFTOOL_PATH_ENV, ExifToolSettings,
    MONGO_URI_ENV, MongoSettings, ScanSettings, Settings,
};

use anyhow::Result;
use std::path::PathBuf;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "exif-database";

/// File name of the processed-set cache.
pub const CACHE_FILE_NAME: &str = "exif-database.json";

/// Default settings file location.
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine user config directory"))?;
    Ok(dir.join(APP_DIR_NAME).join("config.toml"))
}

/// Default processed-set cache location, in the user data directory.
///
/// The directory is not created here; the cache writer creates it on save.
///
/// # Errors
///
/// Returns an error if the platform data directory cannot be determined.
pub fn default_cache_path() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Unable to determine user data directory"))?;
    Ok(dir.join(APP_DIR_NAME).join(CACHE_FILE_NAME))
}
