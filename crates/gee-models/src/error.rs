//! Model validation errors.

use thiserror::Error;

use crate::timestamp::TimestampError;

/// Result type for model construction and conversion.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building or converting model values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),

    #[error("Invalid IPv4 address: {0}")]
    InvalidIpv4(String),

    #[error("Invalid hex camera id: {0}")]
    InvalidCameraHex(String),

    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),
}

impl ModelError {
    pub fn invalid_rectangle(msg: impl Into<String>) -> Self {
        Self::InvalidRectangle(msg.into())
    }
}
