//! The image sink contract.

use std::fmt;

use gee_models::image_filename;

use crate::error::{StorageError, StorageResult};

/// What an image is, which decides where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    QueryFrame,
    PersonShot,
}

impl ImageKind {
    /// Subdirectory under the sink root.
    pub fn dir(&self) -> &'static str {
        match self {
            ImageKind::QueryFrame => "query-frames",
            ImageKind::PersonShot => "person-shots",
        }
    }

    /// Relative key of an image, e.g. `person-shots/abc1230050000.jpeg`.
    pub fn key(&self, identifier: &str) -> String {
        format!("{}/{}", self.dir(), image_filename(identifier))
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

/// Durable storage for encoded images.
pub trait ImageSink: Send + Sync {
    /// Store `bytes` under `identifier`, overwriting any previous image.
    ///
    /// Returns the relative key the image was stored under.
    fn put_image(&self, kind: ImageKind, identifier: &str, bytes: &[u8]) -> StorageResult<String>;

    /// Sink name for logging.
    fn name(&self) -> &'static str;
}

/// Identifiers become file names, so each must be one path component.
///
/// Separators, control characters and a leading `.` are rejected; anything
/// else, `.` and `:` included, is accepted.
pub fn validate_identifier(identifier: &str) -> StorageResult<()> {
    let valid = !identifier.is_empty()
        && !identifier.starts_with('.')
        && !identifier
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if valid {
        Ok(())
    } else {
        Err(StorageError::invalid_identifier(identifier))
    }
}
