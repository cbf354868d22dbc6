//! Cropping detections into identified person regions.

use gee_models::{person_region_id, query_frame_id, Detection, Rectangle};
use tracing::{debug, warn};

use crate::error::MediaError;
use crate::frame::Frame;

/// The frame a request was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFrame {
    pub id: String,
    pub shot_id: String,
    pub frame_offset: u64,
    pub frame: Frame,
}

impl QueryFrame {
    pub fn new(shot_id: impl Into<String>, frame_offset: u64, frame: Frame) -> Self {
        let shot_id = shot_id.into();
        Self {
            id: query_frame_id(&shot_id, frame_offset),
            shot_id,
            frame_offset,
            frame,
        }
    }
}

/// A cropped detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRegion {
    pub id: String,
    pub parent_id: String,
    /// Position of the detection after containment filtering.
    pub index: usize,
    pub rect: Rectangle,
    pub frame: Frame,
}

/// A detection that could not be cropped.
#[derive(Debug)]
pub struct SkippedRegion {
    pub index: usize,
    pub rect: Rectangle,
    pub error: MediaError,
}

/// Regions cropped out of a query frame.
#[derive(Debug, Default)]
pub struct Extraction {
    pub regions: Vec<PersonRegion>,
    pub skipped: Vec<SkippedRegion>,
}

impl Extraction {
    pub fn count(&self) -> usize {
        self.regions.len()
    }
}

/// Crop each detection out of the query frame.
///
/// Region `i` is identified by `{shot}{offset:05}{i:02}`. A detection that
/// falls outside the frame is skipped but still consumes its index.
pub fn extract_regions(query: &QueryFrame, detections: &[Detection]) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, detection) in detections.iter().enumerate() {
        match query.frame.crop(&detection.rect) {
            Ok(frame) => {
                let id = person_region_id(&query.shot_id, query.frame_offset, index);
                debug!(region_id = %id, rect = %detection.rect, weight = detection.weight, "Extracted region");
                extraction.regions.push(PersonRegion {
                    id,
                    parent_id: query.id.clone(),
                    index,
                    rect: detection.rect,
                    frame,
                });
            }
            Err(error) => {
                warn!(
                    query_frame_id = %query.id,
                    index,
                    rect = %detection.rect,
                    error = %error,
                    "Skipping region"
                );
                extraction.skipped.push(SkippedRegion {
                    index,
                    rect: detection.rect,
                    error,
                });
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(width: u32, height: u32) -> QueryFrame {
        QueryFrame::new("abc123", 500, Frame::filled(width, height, 3, 7).unwrap())
    }

    fn det(x: u32, y: u32, w: u32, h: u32) -> Detection {
        Detection::new(Rectangle::new(x, y, w, h).unwrap(), 0.5)
    }

    #[test]
    fn test_query_frame_id() {
        assert_eq!(query(1, 1).id, "abc12300500");
    }

    #[test]
    fn test_regions_are_identified_by_index() {
        let query = query(640, 480);
        let extraction = extract_regions(&query, &[det(10, 10, 50, 100), det(100, 100, 20, 20)]);

        assert_eq!(extraction.count(), 2);
        assert!(extraction.skipped.is_empty());
        assert_eq!(extraction.regions[0].id, "abc1230050000");
        assert_eq!(extraction.regions[1].id, "abc1230050001");
        assert_eq!(extraction.regions[0].parent_id, "abc12300500");
        assert_eq!(extraction.regions[0].frame.width(), 50);
        assert_eq!(extraction.regions[0].frame.height(), 100);
    }

    #[test]
    fn test_out_of_bounds_consumes_index() {
        let query = query(100, 100);
        let extraction = extract_regions(&query, &[det(90, 90, 20, 20), det(0, 0, 10, 10)]);

        assert_eq!(extraction.count(), 1);
        assert_eq!(extraction.regions[0].id, "abc1230050001");
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].index, 0);
        assert!(matches!(
            extraction.skipped[0].error,
            MediaError::RegionOutOfBounds { .. }
        ));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let query = query(64, 64);
        let detections = [det(1, 2, 10, 20)];
        let first = extract_regions(&query, &detections);
        let second = extract_regions(&query, &detections);
        assert_eq!(first.regions, second.regions);
    }

    #[test]
    fn test_no_detections() {
        assert_eq!(extract_regions(&query(8, 8), &[]).count(), 0);
    }
}
