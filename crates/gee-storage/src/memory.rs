//! In-memory image sink.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::sink::{validate_identifier, ImageKind, ImageSink};

/// Keeps images in a map keyed by their relative key.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    images: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ImageKind, identifier: &str) -> Option<Vec<u8>> {
        self.images
            .read()
            .ok()
            .and_then(|images| images.get(&kind.key(identifier)).cloned())
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.images
            .read()
            .map(|images| images.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.images.read().map(|images| images.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageSink for MemoryImageStore {
    fn put_image(&self, kind: ImageKind, identifier: &str, bytes: &[u8]) -> StorageResult<String> {
        validate_identifier(identifier)?;
        let key = kind.key(identifier);
        self.images
            .write()
            .map_err(|_| StorageError::write_failed("image map lock poisoned"))?
            .insert(key.clone(), bytes.to_vec());
        Ok(key)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let store = MemoryImageStore::new();
        store.put_image(ImageKind::QueryFrame, "q", b"a").unwrap();
        store.put_image(ImageKind::PersonShot, "q", b"b").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(ImageKind::QueryFrame, "q").unwrap(), b"a");
        assert_eq!(store.get(ImageKind::PersonShot, "q").unwrap(), b"b");
        assert_eq!(store.keys(), vec!["person-shots/q.jpeg", "query-frames/q.jpeg"]);
    }

    #[test]
    fn test_overwrite_keeps_one_entry() {
        let store = MemoryImageStore::new();
        store.put_image(ImageKind::PersonShot, "p", b"1").unwrap();
        store.put_image(ImageKind::PersonShot, "p", b"2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(ImageKind::PersonShot, "p").unwrap(), b"2");
    }
}
