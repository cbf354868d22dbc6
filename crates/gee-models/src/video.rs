//! Video shot metadata models.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A recorded video segment from one camera.
///
/// Written by the ingestion process; read-only to the retrieval core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoShot {
    /// Shot identifier (camera id + recording id)
    pub id: String,
    /// Camera identifier (hex-encoded IPv4)
    pub camera_id: String,
    /// Container format, e.g. `mp4`
    pub format: String,
    /// Codec name, e.g. `h264`
    pub codec: String,
    /// Frame rate
    pub fps: f64,
    /// Total frame count reported by the container (may be inaccurate)
    pub frames: u64,
    /// Recording start
    pub start_time: NaiveDateTime,
    /// Recording end
    pub end_time: NaiveDateTime,
}

impl VideoShot {
    /// Container filename, `{id}.{format}`.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.id, self.format)
    }
}

/// Physical location of a shot's container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShotLocation {
    /// Directory holding the container
    pub path: String,
    /// Container filename
    pub filename: String,
}

impl ShotLocation {
    pub fn new(path: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }

    /// Absolute container path (`path` joined with `filename`).
    pub fn full_path(&self) -> PathBuf {
        PathBuf::from(&self.path).join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_store_timestamp;

    fn shot(frames: u64) -> VideoShot {
        VideoShot {
            id: "abc123".to_string(),
            camera_id: "c0a87193".to_string(),
            format: "mp4".to_string(),
            codec: "h264".to_string(),
            fps: 30.0,
            frames,
            start_time: parse_store_timestamp("20151010140000").unwrap(),
            end_time: parse_store_timestamp("20151010141000").unwrap(),
        }
    }

    #[test]
    fn test_filename() {
        assert_eq!(shot(10).filename(), "abc123.mp4");
    }

    #[test]
    fn test_full_path() {
        let location = ShotLocation::new("/videos", "abc123.mp4");
        assert_eq!(location.full_path(), PathBuf::from("/videos/abc123.mp4"));
    }
}
