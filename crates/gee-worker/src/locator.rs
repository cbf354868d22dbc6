//! Resolving a (shot, offset) request to a file on disk.

use std::path::PathBuf;

use gee_store::{MetadataCatalog, StoreError};
use tracing::{debug, warn};

use crate::config::FrameBoundsPolicy;
use crate::error::{RetrievalError, RetrievalResult};

/// A request resolved against the metadata store.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFrame {
    pub shot_id: String,
    /// Recorded frame count, when the shot record carries a usable one
    pub frames: Option<u64>,
    pub path: PathBuf,
    pub frame_offset: u64,
}

/// Looks up shots and their storage locations.
#[derive(Clone)]
pub struct FrameLocator {
    catalog: MetadataCatalog,
    policy: FrameBoundsPolicy,
}

impl FrameLocator {
    pub fn new(catalog: MetadataCatalog, policy: FrameBoundsPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn policy(&self) -> FrameBoundsPolicy {
        self.policy
    }

    /// Resolve `shot_id` to an absolute path and check `frame_offset`.
    ///
    /// The shot record only has to exist. The bounds check is skipped when
    /// its frame count is missing or unparseable.
    pub fn locate(&self, shot_id: &str, frame_offset: u64) -> RetrievalResult<LocatedFrame> {
        let frames = self
            .catalog
            .shot_frame_count(shot_id)
            .map_err(lookup_error)?;
        let location = self.catalog.shot_location(shot_id).map_err(lookup_error)?;

        match frames {
            Some(frames) if frame_offset >= frames => match self.policy {
                FrameBoundsPolicy::Ignore => {}
                FrameBoundsPolicy::Warn => warn!(
                    shot_id,
                    frame_offset,
                    frames,
                    "Frame offset beyond recorded frame count"
                ),
                FrameBoundsPolicy::Reject => {
                    return Err(RetrievalError::frame_not_found(shot_id, frame_offset));
                }
            },
            Some(_) => {}
            None => debug!(shot_id, frame_offset, "Frame count unknown, bounds not checked"),
        }

        let path = location.full_path();
        debug!(shot_id, frame_offset, path = %path.display(), "Located frame");

        Ok(LocatedFrame {
            shot_id: shot_id.to_string(),
            frames,
            path,
            frame_offset,
        })
    }
}

/// Missing or unusable records both mean the shot cannot be resolved.
fn lookup_error(err: StoreError) -> RetrievalError {
    match err {
        StoreError::NotFound(key) => RetrievalError::not_found(key),
        StoreError::MalformedRecord { key, source } => {
            warn!(key = %key, error = %source, "Malformed shot record");
            RetrievalError::not_found(format!("{} ({})", key, source))
        }
        other => RetrievalError::Store(other),
    }
}
