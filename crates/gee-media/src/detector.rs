//! Person detection.
//!
//! The default detector is OpenCV's HOG descriptor loaded with the
//! pre-trained Dalal-Triggs people SVM. Any technique producing weighted
//! rectangles can stand in through `RegionDetector`.

use gee_models::Detection;

use crate::error::MediaResult;
use crate::frame::Frame;

#[cfg(feature = "opencv")]
use crate::error::MediaError;
#[cfg(feature = "opencv")]
use tracing::debug;

/// Detects candidate person regions in a frame.
pub trait RegionDetector: Send + Sync {
    /// Detections are unordered; an empty result is a valid outcome.
    fn detect(&self, frame: &Frame) -> MediaResult<Vec<Detection>>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Multi-scale HOG detection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HogConfig {
    /// Window stride in pixels (x, y)
    pub win_stride: (i32, i32),
    /// Padding added around the image (x, y)
    pub padding: (i32, i32),
    /// Pyramid scale factor between levels
    pub scale: f64,
    /// Minimum neighbouring hits for a grouped detection
    pub group_threshold: f64,
    /// SVM decision threshold
    pub hit_threshold: f64,
}

impl Default for HogConfig {
    fn default() -> Self {
        Self {
            win_stride: (8, 8),
            padding: (32, 32),
            scale: 1.05,
            group_threshold: 2.0,
            hit_threshold: 0.0,
        }
    }
}

/// HOG people detector.
#[cfg(feature = "opencv")]
pub struct HogPeopleDetector {
    config: HogConfig,
    hog: std::sync::Mutex<opencv::objdetect::HOGDescriptor>,
}

#[cfg(feature = "opencv")]
impl HogPeopleDetector {
    pub fn new(config: HogConfig) -> MediaResult<Self> {
        use opencv::objdetect::HOGDescriptor;
        use opencv::prelude::HOGDescriptorTrait;

        let mut hog = HOGDescriptor::default()
            .map_err(|e| MediaError::detection_failed(format!("HOG init: {}", e)))?;
        let svm = HOGDescriptor::get_default_people_detector()
            .map_err(|e| MediaError::detection_failed(format!("People SVM: {}", e)))?;
        hog.set_svm_detector(&svm)
            .map_err(|e| MediaError::detection_failed(format!("Set SVM: {}", e)))?;

        Ok(Self {
            config,
            hog: std::sync::Mutex::new(hog),
        })
    }

    pub fn config(&self) -> &HogConfig {
        &self.config
    }
}

#[cfg(feature = "opencv")]
impl RegionDetector for HogPeopleDetector {
    fn detect(&self, frame: &Frame) -> MediaResult<Vec<Detection>> {
        use gee_models::Rectangle;
        use opencv::core::{Mat, Rect, Size, Vector};
        use opencv::imgproc;
        use opencv::prelude::HOGDescriptorTraitConst;

        let mut image = crate::mat::frame_to_mat(frame)?;
        if frame.channels() == 4 {
            let mut bgr = Mat::default();
            imgproc::cvt_color(&image, &mut bgr, imgproc::COLOR_BGRA2BGR, 0)
                .map_err(|e| MediaError::detection_failed(format!("Color convert: {}", e)))?;
            image = bgr;
        }

        let mut found = Vector::<Rect>::new();
        let mut weights = Vector::<f64>::new();
        {
            let hog = self
                .hog
                .lock()
                .map_err(|_| MediaError::detection_failed("HOG descriptor lock poisoned"))?;
            hog.detect_multi_scale_weights(
                &image,
                &mut found,
                &mut weights,
                self.config.hit_threshold,
                Size::new(self.config.win_stride.0, self.config.win_stride.1),
                Size::new(self.config.padding.0, self.config.padding.1),
                self.config.scale,
                self.config.group_threshold,
                false,
            )
            .map_err(|e| MediaError::detection_failed(format!("HOG detect: {}", e)))?;
        }

        let mut detections = Vec::with_capacity(found.len());
        for (i, rect) in found.iter().enumerate() {
            let weight = weights.get(i).unwrap_or(0.0);
            match Rectangle::from_signed(rect.x, rect.y, rect.width, rect.height) {
                Some(rect) => detections.push(Detection::new(rect, weight)),
                None => debug!(
                    x = rect.x,
                    y = rect.y,
                    width = rect.width,
                    height = rect.height,
                    "Dropping degenerate detection"
                ),
            }
        }

        debug!(
            width = frame.width(),
            height = frame.height(),
            detections = detections.len(),
            "HOG people detection complete"
        );
        Ok(detections)
    }

    fn name(&self) -> &'static str {
        "hog-people"
    }
}

/// Stub for when OpenCV is not available
#[cfg(not(feature = "opencv"))]
pub struct HogPeopleDetector;

#[cfg(not(feature = "opencv"))]
impl HogPeopleDetector {
    pub fn new(_config: HogConfig) -> MediaResult<Self> {
        Err(crate::error::MediaError::FeatureDisabled("opencv"))
    }
}

#[cfg(not(feature = "opencv"))]
impl RegionDetector for HogPeopleDetector {
    fn detect(&self, _frame: &Frame) -> MediaResult<Vec<Detection>> {
        Err(crate::error::MediaError::FeatureDisabled("opencv"))
    }

    fn name(&self) -> &'static str {
        "hog-people (disabled)"
    }
}
