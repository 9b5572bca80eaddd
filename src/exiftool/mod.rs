//! Running the external `exiftool` process.
//!
//! [`ExifTool`] invokes `<program> <file>` once per file with stdout and stderr
//! captured, and hands back the raw `Label : Value` text for the
//! [`metadata`](crate::metadata) normalizer. The upload pipeline only depends
//! on the [`MetadataSource`] trait, so tests can substitute canned output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use exif_database::exiftool::{ExifTool, MetadataSource};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let exiftool = ExifTool::new("exiftool").timeout(Some(Duration::from_secs(30)));
//! let raw = exiftool.extract(Path::new("/photos/DSC00001.ARW")).await?;
//! println!("{raw}");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::ExifDatabaseError;

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM: &str = "exiftool";

/// Something that can produce raw exiftool text for a file.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    /// Return the raw `Label : Value` output describing `path`.
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Runner for the `exiftool` command line tool.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
    timeout_duration: Option<Duration>,
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ExifTool {
    /// Create a runner for `program`, a bare name looked up on `PATH` or a
    /// path to the executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout_duration: None,
        }
    }

    /// Abort extraction of a single file after `duration`.
    #[must_use]
    pub const fn timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Check whether the program can be found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn not_found(&self) -> ExifDatabaseError {
        ExifDatabaseError::ExifToolNotFound {
            program: self.program.display().to_string(),
        }
    }

    async fn run(&self, path: &Path) -> Result<String> {
        let program = self.program.display();
        let mut cmd = Command::new(&self.program);
        cmd.arg(path).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(target: "exiftool", "Executing command: {} {}", program, path.display());

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            if let Ok(result) = timeout(duration, output_future).await {
                result
            } else {
                tracing::warn!(
                    target: "exiftool",
                    "Command timed out after {:?}: {} {}",
                    duration,
                    program,
                    path.display()
                );
                return Err(ExifDatabaseError::ExtractionFailed {
                    path: path.display().to_string(),
                    stderr: format!("exiftool timed out after {duration:?}"),
                }
                .into());
            }
        } else {
            output_future.await
        };

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.not_found().into());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to execute {program} on {}", path.display())
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(
                target: "exiftool",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "exiftool", "Error: {}", stderr);
            }
            return Err(ExifDatabaseError::ExtractionFailed {
                path: path.display().to_string(),
                stderr,
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::trace!(target: "exiftool", "Read {} bytes of metadata", stdout.len());
        Ok(stdout)
    }
}

impl MetadataSource for ExifTool {
    async fn extract(&self, path: &Path) -> Result<String> {
        self.run(path).await
    }
}
