//! Retrieval error types.

use gee_media::MediaError;
use gee_storage::StorageError;
use gee_store::StoreError;
use thiserror::Error;

pub type RetrievalResult<T> = Result<T, RetrievalError>;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Frame {frame_offset} not found in shot {shot_id}")]
    FrameNotFound { shot_id: String, frame_offset: u64 },

    #[error("Metadata store error: {0}")]
    Store(#[from] StoreError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RetrievalError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn frame_not_found(shot_id: impl Into<String>, frame_offset: u64) -> Self {
        Self::FrameNotFound {
            shot_id: shot_id.into(),
            frame_offset,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_frame_not_found(&self) -> bool {
        matches!(self, Self::FrameNotFound { .. })
    }

    /// Short label used as the `outcome` of retrieval metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::FrameNotFound { .. } => "frame_not_found",
            Self::Store(_) => "store_error",
            Self::Media(_) => "media_error",
            Self::Storage(_) => "storage_error",
            Self::ConfigError(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(RetrievalError::not_found("vs:zzz").is_not_found());
        let err = RetrievalError::frame_not_found("abc123", 9);
        assert!(err.is_frame_not_found());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Frame 9 not found in shot abc123");
        assert_eq!(err.outcome(), "frame_not_found");
    }
}
