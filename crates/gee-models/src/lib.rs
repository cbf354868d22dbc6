//! Shared data models for the Gee retrieval core.
//!
//! This crate provides Serde-serializable types for:
//! - Video shots and their physical storage location
//! - Detection rectangles and person shot records
//! - Derived identifiers for query frames and person regions
//! - Store timestamp codec and camera id helpers
//! - Response views returned by the retrieval and catalog operations

pub mod camera;
pub mod error;
pub mod ids;
pub mod person_shot;
pub mod rect;
pub mod timestamp;
pub mod video;
pub mod views;

// Re-export common types
pub use camera::{hex_to_ipv4, ipv4_to_hex};
pub use error::{ModelError, ModelResult};
pub use ids::{image_filename, person_region_id, query_frame_id, IMAGE_EXTENSION, REGION_SCALE_HINT};
pub use person_shot::PersonShotRecord;
pub use rect::{Detection, Rectangle};
pub use timestamp::{
    format_display_timestamp, format_store_timestamp, parse_store_timestamp, store_to_display,
    TimestampError,
};
pub use video::{ShotLocation, VideoShot};
pub use views::{
    CameraIndex, CameraView, ExtractionReport, PersonShotMatch, RegionTarget, ShotAttributes,
    TimeRange, VideoShotSummary,
};
