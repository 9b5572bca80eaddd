//! Runtime settings for exif-database.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Built-in defaults (database `exif_database`, collection `pictures`,
//!    program `exiftool`, extension `ARW`)
//! 2. An optional TOML file (see [`super::default_config_path`])
//! 3. Environment variables ([`MONGO_URI_ENV`], [`CACHE_PATH_ENV`], [`EXIFTOOL_PATH_ENV`])
//!
//! # File Format
//!
//! ```toml
//! [mongo]
//! uri = "mongodb://localhost:27017"
//! database = "exif_database"
//! collection = "pictures"
//!
//! [exiftool]
//! program = "/usr/local/bin/exiftool"
//! timeout_secs = 60
//!
//! [scan]
//! extension = "ARW"
//!
//! [cache]
//! path = "/srv/photos/exif-database.json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::core::ExifDatabaseError;
use crate::exiftool::DEFAULT_PROGRAM;
use crate::scanner::DEFAULT_EXTENSION;

/// MongoDB connection string.
pub const MONGO_URI_ENV: &str = "MONGO_URI";
/// Explicit location of the processed-set cache file.
pub const CACHE_PATH_ENV: &str = "EXIF_DATABASE_CACHE";
/// exiftool program name or path.
pub const EXIFTOOL_PATH_ENV: &str = "EXIFTOOL_PATH";
/// Explicit location of the settings file.
pub const CONFIG_PATH_ENV: &str = "EXIF_DATABASE_CONFIG";

/// All runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mongo: MongoSettings,
    pub exiftool: ExifToolSettings,
    pub scan: ScanSettings,
    pub cache: CacheSettings,
}

/// Where documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    /// Connection string; required before connecting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: None,
            database: "exif_database".to_string(),
            collection: "pictures".to_string(),
        }
    }
}

/// How exiftool is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExifToolSettings {
    pub program: String,
    /// Per-file timeout; no timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ExifToolSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout_secs: None,
        }
    }
}

/// Which files are picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extension without the dot, matched case-sensitively.
    pub extension: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Cache file location; the user data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default file location plus environment overrides.
    ///
    /// The file is `$EXIF_DATABASE_CONFIG` when set, otherwise
    /// [`super::default_config_path`]. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => super::default_config_path().ok(),
        };
        Self::load_with_optional(path, |key| std::env::var(key).ok()).await
    }

    /// Load settings from an optional file, then apply overrides from `env`.
    ///
    /// `env` looks up an environment variable by name, which lets tests supply
    /// overrides without touching the process environment.
    pub async fn load_with_optional<F>(path: Option<PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match path {
            Some(path) if path.exists() => Self::load_from(&path).await?,
            Some(path) => {
                tracing::debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        settings.apply_env_overrides(env);
        Ok(settings)
    }

    /// Load settings from a specific TOML file, without environment overrides.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        if let Some(uri) = lookup(MONGO_URI_ENV) {
            self.mongo.uri = Some(uri);
        }
        if let Some(path) = lookup(CACHE_PATH_ENV) {
            self.cache.path = Some(PathBuf::from(path));
        }
        if let Some(program) = lookup(EXIFTOOL_PATH_ENV) {
            self.exiftool.program = program;
        }
    }

    /// The MongoDB connection string.
    ///
    /// # Errors
    ///
    /// [`ExifDatabaseError::ConfigError`] when no layer provided one.
    pub fn mongo_uri(&self) -> Result<&str, ExifDatabaseError> {
        self.mongo.uri.as_deref().ok_or_else(|| ExifDatabaseError::ConfigError {
            message: format!("no MongoDB URI configured ({MONGO_URI_ENV} is not set)"),
        })
    }

    /// Location of the processed-set cache file.
    pub fn cache_path(&self) -> Result<PathBuf> {
        match &self.cache.path {
            Some(path) => Ok(path.clone()),
            None => super::default_cache_path(),
        }
    }

    /// Per-file exiftool timeout.
    #[must_use]
    pub fn exiftool_timeout(&self) -> Option<Duration> {
        self.exiftool.timeout_secs.map(Duration::from_secs)
    }
}
