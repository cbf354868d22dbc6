//! Response views returned to the (external) routing layer.
//!
//! Numeric attributes are rendered as text, matching what the store holds.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::hex_to_ipv4;
use crate::ids::{image_filename, REGION_SCALE_HINT};
use crate::person_shot::PersonShotRecord;
use crate::timestamp::format_display_timestamp;
use crate::video::VideoShot;

/// Recording window rendered as `YYYY-MM-DD hh:mm:ss`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

impl TimeRange {
    pub fn from_shot(shot: &VideoShot) -> Self {
        Self {
            start_time: format_display_timestamp(&shot.start_time),
            end_time: format_display_timestamp(&shot.end_time),
        }
    }
}

/// Camera block of a shot listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CameraView {
    pub id: String,
    pub ip: String,
    pub address: String,
    /// Position of the entry in the listing
    pub index: usize,
}

impl CameraView {
    /// Build the camera block, decoding the IPv4 address from a hex id when possible.
    pub fn new(camera_id: &str, index: usize) -> Self {
        let ip = hex_to_ipv4(camera_id)
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| camera_id.to_string());
        Self {
            id: camera_id.to_string(),
            ip,
            address: String::new(),
            index,
        }
    }
}

/// One entry of the video shot listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoShotSummary {
    pub id: String,
    pub format: String,
    pub fps: String,
    pub frames: String,
    pub codec: String,
    pub time_range: TimeRange,
    pub camera: CameraView,
    pub filename: String,
}

impl VideoShotSummary {
    pub fn new(shot: &VideoShot, index: usize) -> Self {
        Self {
            id: shot.id.clone(),
            format: shot.format.clone(),
            fps: shot.fps.to_string(),
            frames: shot.frames.to_string(),
            codec: shot.codec.clone(),
            time_range: TimeRange::from_shot(shot),
            camera: CameraView::new(&shot.camera_id, index),
            filename: shot.filename(),
        }
    }
}

/// Shot attributes attached to a person shot match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotAttributes {
    pub fps: String,
    pub frames: String,
    pub codec: String,
    pub format: String,
    pub time_range: TimeRange,
}

impl From<&VideoShot> for ShotAttributes {
    fn from(shot: &VideoShot) -> Self {
        Self {
            fps: shot.fps.to_string(),
            frames: shot.frames.to_string(),
            codec: shot.codec.clone(),
            format: shot.format.clone(),
            time_range: TimeRange::from_shot(shot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CameraIndex {
    pub index: usize,
}

/// A stored person shot joined with its owning video shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PersonShotMatch {
    /// Query the match was returned for
    pub id: String,
    pub rect: String,
    pub frame: String,
    pub frame_pos: String,
    pub video_shot: ShotAttributes,
    pub camera: CameraIndex,
}

impl PersonShotMatch {
    pub fn new(query_id: &str, record: &PersonShotRecord, shot: &VideoShot, index: usize) -> Self {
        Self {
            id: query_id.to_string(),
            rect: record.rect.clone(),
            frame: record.frame_id.clone(),
            frame_pos: record.frame_pos.to_string(),
            video_shot: ShotAttributes::from(shot),
            camera: CameraIndex { index },
        }
    }
}

/// Provenance of one extracted person region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegionTarget {
    pub filename: String,
    pub id: String,
    pub scale: String,
    /// Filename of the query frame the region was cut from
    pub parent: String,
}

impl RegionTarget {
    pub fn new(region_id: &str, query_frame_id: &str) -> Self {
        Self {
            filename: image_filename(region_id),
            id: region_id.to_string(),
            scale: REGION_SCALE_HINT.to_string(),
            parent: image_filename(query_frame_id),
        }
    }
}

/// Result of one `locate_and_extract` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionReport {
    /// Public prefix under which person shot images are served
    pub entrance: String,
    pub query_frame_id: String,
    pub count: usize,
    pub targets: Vec<RegionTarget>,
}

impl ExtractionReport {
    pub fn new(
        entrance: impl Into<String>,
        query_frame_id: impl Into<String>,
        targets: Vec<RegionTarget>,
    ) -> Self {
        Self {
            entrance: entrance.into(),
            query_frame_id: query_frame_id.into(),
            count: targets.len(),
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_store_timestamp;

    fn shot() -> VideoShot {
        VideoShot {
            id: "c0a8719320151010142000".to_string(),
            camera_id: "c0a87193".to_string(),
            format: "mp4".to_string(),
            codec: "h264".to_string(),
            fps: 30.0,
            frames: 18078,
            start_time: parse_store_timestamp("20151010140000").unwrap(),
            end_time: parse_store_timestamp("20151010141000").unwrap(),
        }
    }

    #[test]
    fn test_summary_renders_text_fields() {
        let summary = VideoShotSummary::new(&shot(), 3);
        assert_eq!(summary.fps, "30");
        assert_eq!(summary.frames, "18078");
        assert_eq!(summary.filename, "c0a8719320151010142000.mp4");
        assert_eq!(summary.time_range.start_time, "2015-10-10 14:00:00");
        assert_eq!(summary.time_range.end_time, "2015-10-10 14:10:00");
        assert_eq!(summary.camera.ip, "192.168.113.147");
        assert_eq!(summary.camera.index, 3);
    }

    #[test]
    fn test_camera_ip_falls_back_to_raw_id() {
        let camera = CameraView::new("lobby-cam", 0);
        assert_eq!(camera.ip, "lobby-cam");
        assert_eq!(camera.address, "");
    }

    #[test]
    fn test_person_match_carries_query_id() {
        let record = PersonShotRecord {
            id: "c0a87193201510101400000050000".to_string(),
            cam_id: "c0a87193".to_string(),
            video_id: "20151010140000".to_string(),
            rect: "10,20,30,40".to_string(),
            frame_id: "c0a871932015101014000000500".to_string(),
            frame_pos: 500,
        };
        let found = PersonShotMatch::new("q7", &record, &shot(), 4);
        assert_eq!(found.id, "q7");
        assert_eq!(found.frame, record.frame_id);
        assert_eq!(found.frame_pos, "500");
        assert_eq!(found.camera.index, 4);
    }

    #[test]
    fn test_region_target() {
        let target = RegionTarget::new("abc1230050000", "abc12300500");
        assert_eq!(target.filename, "abc1230050000.jpeg");
        assert_eq!(target.parent, "abc12300500.jpeg");
        assert_eq!(target.scale, "3:8");
    }

    #[test]
    fn test_report_count_and_json() {
        let report = ExtractionReport::new(
            "/static/tmp/person-shots/",
            "abc12300500",
            vec![RegionTarget::new("abc1230050000", "abc12300500")],
        );
        assert_eq!(report.count, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["targets"][0]["id"], "abc1230050000");
    }
}
