//! In-process metadata store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{Fields, MetadataStore};

/// Metadata store held in memory, used for tests and local tooling.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Fields>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("memory store lock poisoned")
}

impl MetadataStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Fields> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .get(key)
            .filter(|fields| !fields.is_empty())
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = records
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn put(&self, key: &str, fields: &Fields) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let record = records.entry(key.to_string()).or_default();
        for (field, value) in fields {
            record.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
