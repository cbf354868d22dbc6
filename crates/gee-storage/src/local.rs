//! Filesystem image sink.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::sink::{validate_identifier, ImageKind, ImageSink};

/// Writes images to `<root>/<kind>/<identifier>.jpeg`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path an image is (or would be) stored at.
    pub fn path_for(&self, kind: ImageKind, identifier: &str) -> StorageResult<PathBuf> {
        validate_identifier(identifier)?;
        Ok(self.root.join(kind.key(identifier)))
    }

    /// Read a stored image back.
    pub fn read_image(&self, kind: ImageKind, identifier: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(kind, identifier)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(kind.key(identifier)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl ImageSink for LocalImageStore {
    fn put_image(&self, kind: ImageKind, identifier: &str, bytes: &[u8]) -> StorageResult<String> {
        let path = self.path_for(kind, identifier)?;
        let dir = path
            .parent()
            .ok_or_else(|| StorageError::write_failed(format!("no parent for {}", path.display())))?;
        fs::create_dir_all(dir)?;

        // Write beside the target and rename so readers never see a partial file
        let tmp = dir.join(format!(".{}.{}.tmp", identifier, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::write_failed(format!("{}: {}", path.display(), e)));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Stored image");
        Ok(kind.key(identifier))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
