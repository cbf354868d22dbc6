#![deny(unreachable_patterns)]
//! Frame decoding, person detection and region extraction.
//!
//! This crate provides:
//! - An owned raster `Frame` with bounds-checked cropping
//! - Seek-and-decode of a single frame by index (`FrameDecoder`)
//! - Person detection with the OpenCV HOG people detector (`RegionDetector`)
//! - Strict-containment filtering of detections
//! - Cropping of detections into identified person regions
//! - JPEG encoding of frames

pub mod containment;
pub mod decoder;
pub mod detector;
pub mod encode;
pub mod error;
pub mod extract;
pub mod frame;
#[cfg(feature = "opencv")]
mod mat;

pub use containment::{filter_contained, is_strictly_inside};
pub use decoder::{FrameDecoder, OpenCvFrameDecoder};
pub use detector::{HogConfig, HogPeopleDetector, RegionDetector};
pub use encode::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use error::{MediaError, MediaResult};
pub use extract::{extract_regions, Extraction, PersonRegion, QueryFrame, SkippedRegion};
pub use frame::Frame;
