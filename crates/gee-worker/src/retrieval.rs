//! The frame retrieval pipeline.
//!
//! `locate_and_extract` runs one request end to end: locate the shot, decode
//! the frame, persist it as the query frame, detect people, drop contained
//! detections, crop and persist each remaining region. Region failures are
//! logged and skipped; everything before them fails the request.

use std::sync::Arc;
use std::time::Instant;

use gee_media::{
    encode_jpeg, extract_regions, filter_contained, FrameDecoder, MediaError, PersonRegion,
    QueryFrame, RegionDetector,
};
use gee_models::{query_frame_id, ExtractionReport, RegionTarget};
use gee_storage::{validate_identifier, ImageKind, ImageSink, StorageError};
use gee_store::MetadataCatalog;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::WorkerConfig;
use crate::error::{RetrievalError, RetrievalResult};
use crate::locator::FrameLocator;
use crate::logging::RequestLogger;
use crate::metrics::{self, SkipReason};

/// One entry of a batch extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub shot_id: String,
    pub frame_offset: u64,
}

impl BatchRequest {
    pub fn new(shot_id: impl Into<String>, frame_offset: u64) -> Self {
        Self {
            shot_id: shot_id.into(),
            frame_offset,
        }
    }
}

/// Result of one batch entry.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub shot_id: String,
    pub frame_offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExtractionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Locates frames and extracts person regions from them.
pub struct RetrievalPipeline {
    locator: FrameLocator,
    decoder: Arc<dyn FrameDecoder>,
    detector: Arc<dyn RegionDetector>,
    sink: Arc<dyn ImageSink>,
    jpeg_quality: u8,
    entrance: String,
}

impl RetrievalPipeline {
    pub fn new(
        catalog: MetadataCatalog,
        decoder: Arc<dyn FrameDecoder>,
        detector: Arc<dyn RegionDetector>,
        sink: Arc<dyn ImageSink>,
        config: &WorkerConfig,
    ) -> Self {
        Self {
            locator: FrameLocator::new(catalog, config.frame_bounds),
            decoder,
            detector,
            sink,
            jpeg_quality: config.jpeg_quality,
            entrance: config.person_shot_entrance.clone(),
        }
    }

    /// Extract the person regions of frame `frame_offset` of `shot_id`.
    ///
    /// Fails with `NotFound` when the shot, its location or its container is
    /// missing, and `FrameNotFound` when no frame exists at the offset.
    pub fn locate_and_extract(
        &self,
        shot_id: &str,
        frame_offset: u64,
    ) -> RetrievalResult<ExtractionReport> {
        let logger = RequestLogger::new(shot_id, frame_offset);
        let _span = logger.create_span().entered();
        let started = Instant::now();
        logger.log_start(&format!(
            "decoder={} detector={} sink={}",
            self.decoder.name(),
            self.detector.name(),
            self.sink.name()
        ));

        let result = self.run(&logger, shot_id, frame_offset);
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(report) => {
                metrics::record_retrieval("ok", elapsed);
                metrics::record_regions_extracted(report.count);
                logger.log_completion(&format!(
                    "{} regions in {:.3}s",
                    report.count, elapsed
                ));
            }
            Err(e) => {
                metrics::record_retrieval(e.outcome(), elapsed);
                logger.log_failure(&e.to_string());
            }
        }

        result
    }

    fn run(
        &self,
        logger: &RequestLogger,
        shot_id: &str,
        frame_offset: u64,
    ) -> RetrievalResult<ExtractionReport> {
        let located = self.locator.locate(shot_id, frame_offset)?;
        validate_identifier(&query_frame_id(shot_id, frame_offset)).map_err(unstorable_shot)?;

        let frame = self
            .decoder
            .decode_frame(&located.path, frame_offset)
            .map_err(|e| decode_error(shot_id, frame_offset, e))?;
        let query = QueryFrame::new(shot_id, frame_offset, frame);

        let jpeg = encode_jpeg(&query.frame, self.jpeg_quality)?;
        self.sink.put_image(ImageKind::QueryFrame, &query.id, &jpeg)?;
        debug!(query_frame_id = %query.id, "Stored query frame");

        let detections = self.detector.detect(&query.frame)?;
        let maximal = filter_contained(&detections);
        debug!(
            detected = detections.len(),
            maximal = maximal.len(),
            "Filtered contained detections"
        );

        let extraction = extract_regions(&query, &maximal);
        for skipped in &extraction.skipped {
            metrics::record_region_skipped(SkipReason::OutOfBounds);
            logger.log_warning(&format!("region {} skipped: {}", skipped.index, skipped.error));
        }

        let targets: Vec<RegionTarget> = extraction
            .regions
            .iter()
            .filter_map(|region| self.persist_region(logger, region))
            .collect();

        info!(
            query_frame_id = %query.id,
            regions = targets.len(),
            skipped = maximal.len() - targets.len(),
            "Extracted person regions"
        );
        Ok(ExtractionReport::new(&self.entrance, &query.id, targets))
    }

    fn persist_region(&self, logger: &RequestLogger, region: &PersonRegion) -> Option<RegionTarget> {
        let jpeg = match encode_jpeg(&region.frame, self.jpeg_quality) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                metrics::record_region_skipped(SkipReason::Encode);
                logger.log_warning(&format!("region {} not encoded: {}", region.id, e));
                return None;
            }
        };

        if let Err(e) = self.sink.put_image(ImageKind::PersonShot, &region.id, &jpeg) {
            metrics::record_region_skipped(SkipReason::Storage);
            logger.log_warning(&format!("region {} not stored: {}", region.id, e));
            return None;
        }

        Some(RegionTarget::new(&region.id, &region.parent_id))
    }

    /// Run independent requests on a pool of `max_parallel` threads.
    ///
    /// Outcomes are returned in request order.
    pub fn extract_batch(
        &self,
        requests: &[BatchRequest],
        max_parallel: usize,
    ) -> RetrievalResult<Vec<BatchOutcome>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_parallel.max(1))
            .thread_name(|i| format!("gee-retrieval-{}", i))
            .build()
            .map_err(|e| RetrievalError::config_error(format!("thread pool: {}", e)))?;

        Ok(pool.install(|| {
            requests
                .par_iter()
                .map(|request| {
                    match self.locate_and_extract(&request.shot_id, request.frame_offset) {
                        Ok(report) => BatchOutcome {
                            shot_id: request.shot_id.clone(),
                            frame_offset: request.frame_offset,
                            report: Some(report),
                            error: None,
                        },
                        Err(e) => BatchOutcome {
                            shot_id: request.shot_id.clone(),
                            frame_offset: request.frame_offset,
                            report: None,
                            error: Some(e.to_string()),
                        },
                    }
                })
                .collect()
        }))
    }
}

/// A shot whose ids cannot name an image is reported as a missing shot.
fn unstorable_shot(err: StorageError) -> RetrievalError {
    match err {
        StorageError::InvalidIdentifier(id) => {
            warn!(id = %id, "Shot id cannot name a stored image");
            RetrievalError::not_found(format!("unstorable id '{}'", id))
        }
        other => RetrievalError::Storage(other),
    }
}

/// An unopenable container is reported as a missing shot.
fn decode_error(shot_id: &str, frame_offset: u64, err: MediaError) -> RetrievalError {
    match err {
        MediaError::UnreadableContainer { path, reason } => {
            warn!(shot_id, path = %path.display(), reason = %reason, "Unreadable container");
            RetrievalError::not_found(format!("{} ({})", path.display(), reason))
        }
        MediaError::FrameNotFound { .. } => RetrievalError::frame_not_found(shot_id, frame_offset),
        other => RetrievalError::Media(other),
    }
}
