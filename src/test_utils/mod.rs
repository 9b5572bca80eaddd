//! Test utilities for exif-database
//!
//! In-memory stand-ins for the two external systems of an upload run, plus
//! shared logging setup and sample exiftool output.
//!
//! - [`MemoryStore`] - a [`DocumentStore`](crate::store::DocumentStore) that
//!   keeps documents in memory and rejects duplicate identifiers
//! - [`StaticMetadataSource`] - a [`MetadataSource`](crate::exiftool::MetadataSource)
//!   returning canned exiftool output per path
//!
//! # Example
//!
//! ```rust,ignore
//! use exif_database::test_utils::{MemoryStore, StaticMetadataSource, SAMPLE_OUTPUT};
//! use exif_database::uploader::Uploader;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = StaticMetadataSource::new().with_output("/photos/a.ARW", SAMPLE_OUTPUT);
//! let uploader = Uploader::new(source, MemoryStore::new(), "/tmp/cache.json");
//! uploader.run(Path::new("/photos"), "ARW").await?;
//! # Ok(())
//! # }
//! ```

mod fakes;

pub use fakes::{MemoryStore, StaticMetadataSource};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Abridged `exiftool` output for a Sony ARW file.
pub const SAMPLE_OUTPUT: &str = "\
ExifTool Version Number         : 12.76
File Name                       : DSC00001.ARW
File Size                       : 24 MB
File Modification Date/Time     : 2023:05:01 10:15:31+02:00
Make                            : SONY
Camera Model Name               : ILCE-7M3
X Resolution                    : 350
Y Resolution                    : 350
Exposure Time                   : 1/250
F Number                        : 2.8
ISO                             : 100
Date/Time Original              : 2023:05:01 10:15:30.25
Create Date                     : 2023:05:01 10:15:30.123456+02:00
Focal Length                    : 35.0 mm
Image Width                     : 6000
Image Height                    : 4000
Aperture                        : 2.8
Megapixels                      : 24.0
Light Value                     : 12.3
";

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set, that level is used;
/// otherwise logging is enabled only when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=exif_database=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
