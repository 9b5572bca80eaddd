//! Common test utilities and fixtures for exif-database integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch photo library plus an isolated cache and config location.
pub struct PhotoLibrary {
    temp: TempDir,
}

impl PhotoLibrary {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        fs::create_dir_all(temp.path().join("photos"))?;
        Ok(Self {
            temp,
        })
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("photos")
    }

    pub fn cache_path(&self) -> PathBuf {
        self.temp.path().join("data").join("exif-database.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    /// Create an empty file at `relative` under the library root.
    pub fn add_photo(&self, relative: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, b"raw")?;
        Ok(path)
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        fs::write(self.config_path(), content)?;
        Ok(())
    }

    /// Binary invocation isolated from the user's config, cache and terminal.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("exif-database").unwrap();
        cmd.env_remove("MONGO_URI")
            .env_remove("EXIFTOOL_PATH")
            .env_remove("RUST_LOG")
            .env("EXIF_DATABASE_CONFIG", self.config_path())
            .env("EXIF_DATABASE_CACHE", self.cache_path())
            .env("EXIF_DATABASE_NO_PROGRESS", "1");
        cmd
    }
}

/// Path string as recorded in the cache and in documents.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
