//! Redis hash implementation of the metadata store.
//!
//! Each record is a Redis hash. A connection is opened per call so the store
//! can be shared freely across worker threads.

use redis::Commands;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{Fields, MetadataStore};

/// Metadata store backed by Redis hashes.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// Create a store for `redis_url` (e.g. `redis://127.0.0.1:6379/0`).
    ///
    /// No connection is made until the first operation.
    pub fn new(redis_url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    fn connection(&self) -> StoreResult<redis::Connection> {
        Ok(self.client.get_connection()?)
    }
}

/// Escape glob metacharacters so `prefix` matches literally.
fn glob_escape(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl MetadataStore for RedisStore {
    fn get(&self, key: &str) -> StoreResult<Fields> {
        let mut conn = self.connection()?;
        let fields: Fields = conn.hgetall(key)?;
        if fields.is_empty() {
            return Err(StoreError::not_found(key));
        }
        Ok(fields)
    }

    fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection()?;
        let pattern = format!("{}*", glob_escape(prefix));
        let mut keys: Vec<String> = conn.keys(&pattern)?;
        keys.sort();
        debug!(pattern = %pattern, count = keys.len(), "Listed store keys");
        Ok(keys)
    }

    fn put(&self, key: &str, fields: &Fields) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection()?;
        let items: Vec<(&str, &str)> = fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();
        conn.hset_multiple::<_, _, _, ()>(key, items.as_slice())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_escape() {
        assert_eq!(glob_escape("vs:"), "vs:");
        assert_eq!(glob_escape("a*b?[c]\\"), "a\\*b\\?\\[c\\]\\\\");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(RedisStore::new("not a url").is_err());
    }
}
