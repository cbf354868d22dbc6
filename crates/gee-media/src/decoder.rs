//! Seek-and-decode of a single frame.

use std::path::Path;

use crate::error::MediaResult;
use crate::frame::Frame;

#[cfg(feature = "opencv")]
use crate::error::MediaError;
#[cfg(feature = "opencv")]
use tracing::{debug, warn};

/// Random-access decoding of one frame by index.
pub trait FrameDecoder: Send + Sync {
    /// Decode the frame at `frame_offset` of the container at `path`.
    ///
    /// Fails with `UnreadableContainer` when the container cannot be opened
    /// and `FrameNotFound` when no frame is produced at the offset.
    fn decode_frame(&self, path: &Path, frame_offset: u64) -> MediaResult<Frame>;

    /// Decoder name for logging.
    fn name(&self) -> &'static str;
}

/// Consecutive empty reads tolerated after a seek.
pub const MAX_EMPTY_READS: u32 = 3;

/// Frame decoder backed by OpenCV `VideoCapture`.
#[derive(Debug, Clone)]
pub struct OpenCvFrameDecoder {
    max_empty_reads: u32,
}

impl Default for OpenCvFrameDecoder {
    fn default() -> Self {
        Self {
            max_empty_reads: MAX_EMPTY_READS,
        }
    }
}

impl OpenCvFrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_empty_reads(mut self, reads: u32) -> Self {
        self.max_empty_reads = reads.max(1);
        self
    }
}

#[cfg(feature = "opencv")]
impl FrameDecoder for OpenCvFrameDecoder {
    fn decode_frame(&self, path: &Path, frame_offset: u64) -> MediaResult<Frame> {
        use opencv::core::Mat;
        use opencv::prelude::{MatTraitConst, VideoCaptureTrait, VideoCaptureTraitConst};
        use opencv::videoio::{VideoCapture, CAP_ANY, CAP_PROP_POS_FRAMES};

        let path_str = path
            .to_str()
            .ok_or_else(|| MediaError::unreadable_container(path, "path is not valid UTF-8"))?;

        let cap = VideoCapture::from_file(path_str, CAP_ANY)
            .map_err(|e| MediaError::unreadable_container(path, e.to_string()))?;
        let mut cap = scopeguard::guard(cap, |mut cap| {
            if let Err(e) = cap.release() {
                debug!(error = %e, "Failed to release capture");
            }
        });

        if !cap.is_opened().unwrap_or(false) {
            return Err(MediaError::unreadable_container(path, "container could not be opened"));
        }

        match cap.set(CAP_PROP_POS_FRAMES, frame_offset as f64) {
            Ok(true) => {}
            Ok(false) => {
                debug!(path = %path.display(), frame_offset, "Seek rejected by container");
                return Err(MediaError::frame_not_found(path, frame_offset));
            }
            Err(e) => {
                warn!(path = %path.display(), frame_offset, error = %e, "Seek failed");
                return Err(MediaError::frame_not_found(path, frame_offset));
            }
        }

        let mut empty_reads = 0;
        while empty_reads < self.max_empty_reads {
            let mut frame = Mat::default();
            match cap.read(&mut frame) {
                // End of stream
                Ok(false) => break,
                Ok(true) if !frame.empty() => {
                    let frame = crate::mat::mat_to_frame(&frame)?;
                    debug!(
                        path = %path.display(),
                        frame_offset,
                        width = frame.width(),
                        height = frame.height(),
                        "Decoded frame"
                    );
                    return Ok(frame);
                }
                Ok(true) => empty_reads += 1,
                Err(e) => {
                    warn!(path = %path.display(), frame_offset, error = %e, "Frame read failed");
                    empty_reads += 1;
                }
            }
        }

        Err(MediaError::frame_not_found(path, frame_offset))
    }

    fn name(&self) -> &'static str {
        "opencv"
    }
}

/// Stub for when OpenCV is not available
#[cfg(not(feature = "opencv"))]
impl FrameDecoder for OpenCvFrameDecoder {
    fn decode_frame(&self, _path: &Path, _frame_offset: u64) -> MediaResult<Frame> {
        Err(crate::error::MediaError::FeatureDisabled("opencv"))
    }

    fn name(&self) -> &'static str {
        "opencv (disabled)"
    }
}
