//! Error types for media operations.

use std::path::PathBuf;

use gee_models::Rectangle;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while decoding, detecting or extracting.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Cannot open video container {path}: {reason}")]
    UnreadableContainer { path: PathBuf, reason: String },

    #[error("No frame decoded at offset {frame_offset} of {path}")]
    FrameNotFound { path: PathBuf, frame_offset: u64 },

    #[error("Region {rect} exceeds frame bounds {frame_width}x{frame_height}")]
    RegionOutOfBounds {
        rect: Rectangle,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Person detection failed: {0}")]
    DetectionFailed(String),

    #[error("Image encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),
}

impl MediaError {
    pub fn unreadable_container(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnreadableContainer {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn frame_not_found(path: impl Into<PathBuf>, frame_offset: u64) -> Self {
        Self::FrameNotFound {
            path: path.into(),
            frame_offset,
        }
    }

    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame(message.into())
    }

    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::EncodeFailed(message.into())
    }
}
