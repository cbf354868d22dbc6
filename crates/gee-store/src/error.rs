//! Store error types.

use thiserror::Error;

use crate::records::RecordError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Malformed record {key}: {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: RecordError,
    },

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

impl StoreError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn malformed(key: impl Into<String>, source: RecordError) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            source,
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
