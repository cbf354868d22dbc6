//! Previously extracted person shot records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person region stored under `ps:<id>` by an earlier extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PersonShotRecord {
    /// Region key (without the `ps:` prefix)
    pub id: String,
    /// Camera id of the owning shot
    pub cam_id: String,
    /// Recording id of the owning shot
    pub video_id: String,
    /// Bounding geometry as stored (free text)
    pub rect: String,
    /// Identifier of the frame the region was cut from
    pub frame_id: String,
    /// Frame offset inside the owning shot
    pub frame_pos: u64,
}

impl PersonShotRecord {
    /// Identifier of the owning video shot (`cam_id` + `video_id`).
    pub fn shot_id(&self) -> String {
        format!("{}{}", self.cam_id, self.video_id)
    }
}
