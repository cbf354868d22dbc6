//! Worker configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::RetrievalError;

/// What to do when a requested offset is past the shot's recorded frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameBoundsPolicy {
    /// Skip the check and let the decoder decide.
    Ignore,
    /// Log and continue to the decoder.
    #[default]
    Warn,
    /// Fail with `FrameNotFound` before decoding.
    Reject,
}

impl FromStr for FrameBoundsPolicy {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(RetrievalError::config_error(format!(
                "unknown frame bounds policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FrameBoundsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
            Self::Reject => "reject",
        })
    }
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Metadata store connection URL
    pub redis_url: String,
    /// Root directory for persisted images
    pub output_dir: PathBuf,
    /// Offset validation against the shot frame count
    pub frame_bounds: FrameBoundsPolicy,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Worker threads for batch extraction
    pub max_parallel: usize,
    /// Public prefix reported for extracted person shots
    pub person_shot_entrance: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
            output_dir: PathBuf::from("actor/static/tmp"),
            frame_bounds: FrameBoundsPolicy::Warn,
            jpeg_quality: 90,
            max_parallel: 4,
            person_shot_entrance: "/static/tmp/person-shots/".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            output_dir: lookup("GEE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            frame_bounds: lookup("GEE_FRAME_BOUNDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frame_bounds),
            jpeg_quality: lookup("GEE_JPEG_QUALITY")
                .and_then(|s| s.trim().parse::<u8>().ok())
                .filter(|q| (1..=100).contains(q))
                .unwrap_or(defaults.jpeg_quality),
            max_parallel: lookup("GEE_MAX_PARALLEL")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_parallel),
            person_shot_entrance: lookup("GEE_PERSON_SHOT_ENTRANCE")
                .unwrap_or(defaults.person_shot_entrance),
        }
    }
}
