//! Command-line interface for exif-database.
//!
//! The binary takes a single positional argument, the directory to scan:
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017 exif-database /srv/photos
//! ```
//!
//! Everything else comes from [`Settings`]: the optional config file and the
//! environment overrides (`MONGO_URI`, `EXIF_DATABASE_CACHE`, `EXIFTOOL_PATH`).
//!
//! # Logging
//!
//! Per-file `Uploading`/`Skipping` lines and the run summary are logged at
//! `info`. `RUST_LOG` replaces the default `exif_database=info` filter:
//!
//! ```bash
//! RUST_LOG=exif_database=debug,exiftool=debug exif-database /srv/photos
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::core::ExifDatabaseError;
use crate::exiftool::ExifTool;
use crate::store::MongoStore;
use crate::uploader::{UploadSummary, Uploader};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "exif_database=info";

/// Upload exiftool metadata of raw photo files to MongoDB.
#[derive(Parser, Debug)]
#[command(
    name = "exif-database",
    about = "Upload exiftool metadata of raw photo files to MongoDB",
    version,
    long_about = "Recursively scans ROOT for raw photo files, extracts their metadata with \
                  exiftool and inserts one document per new file into MongoDB. Files uploaded \
                  by earlier runs are remembered in a cache and skipped."
)]
pub struct Cli {
    /// Directory to scan recursively
    root: PathBuf,
}

impl Cli {
    /// Run an upload with settings loaded from the config file and environment.
    ///
    /// # Errors
    ///
    /// Any failure of settings loading or of the upload run.
    pub async fn execute(self) -> Result<()> {
        init_logging();
        let settings = Settings::load().await?;
        self.execute_with_settings(settings).await.map(|_| ())
    }

    /// Run an upload with explicit settings.
    ///
    /// # Errors
    ///
    /// - [`ExifDatabaseError::RootNotFound`] if the root is not a directory
    /// - [`ExifDatabaseError::ConfigError`] if no MongoDB URI is configured
    /// - any error of [`Uploader::run`]
    pub async fn execute_with_settings(self, settings: Settings) -> Result<UploadSummary> {
        if !self.root.is_dir() {
            return Err(ExifDatabaseError::RootNotFound {
                path: self.root.display().to_string(),
            }
            .into());
        }
        settings.mongo_uri()?;

        let exiftool =
            ExifTool::new(&settings.exiftool.program).timeout(settings.exiftool_timeout());
        if !exiftool.is_available() {
            warn!("{} was not found; extraction will fail", exiftool.program().display());
        }

        let store = MongoStore::connect(&settings.mongo).await?;
        let uploader = Uploader::new(exiftool, store, settings.cache_path()?);

        let summary = uploader.run(&self.root, &settings.scan.extension).await?;
        info!("{}", summary);
        Ok(summary)
    }

    #[must_use]
    pub const fn root(&self) -> &PathBuf {
        &self.root
    }
}

/// Install the global tracing subscriber.
///
/// Uses `RUST_LOG` when set, otherwise [`DEFAULT_LOG_FILTER`]. Calling this
/// more than once is harmless.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
