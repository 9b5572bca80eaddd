//! Progress indicators for upload runs
//!
//! A thin wrapper over `indicatif` so every progress bar in exif-database has
//! the same styling and honors the same switch.
//!
//! # Environment Variables
//!
//! - `EXIF_DATABASE_NO_PROGRESS`: Set to any value to disable all progress indicators
//!
//! Bars are also hidden automatically when stderr is not a terminal, so logs
//! captured by cron or CI stay clean.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

/// Environment variable that disables progress output.
pub const NO_PROGRESS_ENV: &str = "EXIF_DATABASE_NO_PROGRESS";

fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// A progress bar with the exif-database styling.
///
/// # Examples
///
/// ```rust
/// use exif_database::utils::progress::ProgressBar;
///
/// let progress = ProgressBar::new(3);
/// for path in ["a.ARW", "b.ARW", "c.ARW"] {
///     progress.set_message(path);
///     progress.inc(1);
/// }
/// progress.finish_and_clear();
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a bar tracking `len` units of work, hidden when progress is disabled.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// Set the message shown to the right of the bar.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Run `f` with the bar hidden so log lines are not overdrawn.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.inner.suspend(f)
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Whether output is suppressed (disabled or no terminal attached).
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {wide_msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}
