//! Derived identifiers for query frames and person regions.
//!
//! Identifiers are stable lookup keys and filename stems:
//! - query frame: `{shot_id}{frame_offset:05}`
//! - person region: `{shot_id}{frame_offset:05}{region_index:02}`

/// File extension used for every persisted image.
pub const IMAGE_EXTENSION: &str = "jpeg";

/// Scale hint attached to every person region target.
pub const REGION_SCALE_HINT: &str = "3:8";

/// Identifier of the frame decoded at `frame_offset` of a shot.
pub fn query_frame_id(shot_id: &str, frame_offset: u64) -> String {
    format!("{}{:05}", shot_id, frame_offset)
}

/// Identifier of the `region_index`-th region detected in a query frame.
pub fn person_region_id(shot_id: &str, frame_offset: u64, region_index: usize) -> String {
    format!("{}{:05}{:02}", shot_id, frame_offset, region_index)
}

/// Filename for a persisted image with the given identifier.
pub fn image_filename(id: &str) -> String {
    format!("{}.{}", id, IMAGE_EXTENSION)
}
