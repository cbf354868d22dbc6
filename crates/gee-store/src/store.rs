//! The metadata store contract.

use std::collections::BTreeMap;

use crate::error::StoreResult;

/// A flat field-to-string record, as held by the store.
pub type Fields = BTreeMap<String, String>;

/// Key-value metadata store.
///
/// Implementations must tolerate concurrent readers and writers; writes are
/// last-write-wins per field with no transactional guarantee.
pub trait MetadataStore: Send + Sync {
    /// Fetch every field of `key`.
    ///
    /// Returns `StoreError::NotFound` when the key holds no fields.
    fn get(&self, key: &str) -> StoreResult<Fields>;

    /// List keys starting with `prefix`, sorted.
    fn keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Merge `fields` into the record at `key`.
    fn put(&self, key: &str, fields: &Fields) -> StoreResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
