//! Typed access to the metadata store.
//!
//! `MetadataCatalog` is the adapter the rest of the workspace talks to: it
//! owns the key-space conventions and the record marshaling, and implements
//! the bulk listing operations with per-record fault isolation.

use std::collections::HashMap;
use std::sync::Arc;

use gee_models::{
    PersonShotMatch, PersonShotRecord, ShotLocation, VideoShot, VideoShotSummary,
};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::records;
use crate::store::MetadataStore;

/// Typed facade over a `MetadataStore`.
#[derive(Clone)]
pub struct MetadataCatalog {
    store: Arc<dyn MetadataStore>,
}

impl MetadataCatalog {
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn MetadataStore {
        self.store.as_ref()
    }

    /// Load the `vs:` record of a shot.
    pub fn video_shot(&self, shot_id: &str) -> StoreResult<VideoShot> {
        let key = keys::video_shot(shot_id);
        let fields = self.store.get(&key)?;
        records::video_shot_from_fields(shot_id, &fields).map_err(|e| StoreError::malformed(key, e))
    }

    /// Recorded frame count of a shot whose `vs:` record exists.
    ///
    /// Only `frames` is read. `None` when it is missing or unparseable.
    pub fn shot_frame_count(&self, shot_id: &str) -> StoreResult<Option<u64>> {
        let key = keys::video_shot(shot_id);
        let fields = self.store.get(&key)?;
        match records::frame_count_from_fields(&fields) {
            Ok(frames) => Ok(Some(frames)),
            Err(e) => {
                warn!(key = %key, error = %e, "Frame count unavailable");
                Ok(None)
            }
        }
    }

    /// Load the `vsb:` record of a shot.
    pub fn shot_location(&self, shot_id: &str) -> StoreResult<ShotLocation> {
        let key = keys::shot_location(shot_id);
        let fields = self.store.get(&key)?;
        records::shot_location_from_fields(&fields).map_err(|e| StoreError::malformed(key, e))
    }

    /// Load a previously extracted person shot.
    pub fn person_shot(&self, region_id: &str) -> StoreResult<PersonShotRecord> {
        let key = keys::person_shot(region_id);
        let fields = self.store.get(&key)?;
        records::person_shot_from_fields(region_id, &fields)
            .map_err(|e| StoreError::malformed(key, e))
    }

    pub fn save_video_shot(&self, shot: &VideoShot) -> StoreResult<()> {
        self.store.put(
            &keys::video_shot(&shot.id),
            &records::video_shot_to_fields(shot),
        )
    }

    pub fn save_shot_location(&self, shot_id: &str, location: &ShotLocation) -> StoreResult<()> {
        self.store.put(
            &keys::shot_location(shot_id),
            &records::shot_location_to_fields(location),
        )
    }

    pub fn save_person_shot(&self, record: &PersonShotRecord) -> StoreResult<()> {
        self.store.put(
            &keys::person_shot(&record.id),
            &records::person_shot_to_fields(record),
        )
    }

    /// List every video shot.
    ///
    /// Records that are malformed or vanish mid-listing are skipped; the
    /// `camera.index` of each entry is its position in the returned list.
    pub fn list_video_shots(&self) -> StoreResult<Vec<VideoShotSummary>> {
        let shot_keys = self.store.keys(keys::VIDEO_SHOT_PREFIX)?;
        let mut summaries = Vec::with_capacity(shot_keys.len());

        for key in &shot_keys {
            let Some(shot_id) = keys::strip(key, keys::VIDEO_SHOT_PREFIX) else {
                continue;
            };
            match skip_unusable(self.video_shot(shot_id))? {
                Some(shot) => summaries.push(VideoShotSummary::new(&shot, summaries.len())),
                None => continue,
            }
        }

        info!(
            listed = summaries.len(),
            skipped = shot_keys.len() - summaries.len(),
            "Listed video shots"
        );
        Ok(summaries)
    }

    /// Return every stored person shot joined with its owning video shot.
    ///
    /// No similarity ranking is applied. Every match carries `query_id` as
    /// its id and the position of its key in the scan as `camera.index`.
    /// Person shots whose record or owning shot is malformed or missing are
    /// skipped without renumbering the rest.
    pub fn search_person_shots(&self, query_id: &str) -> StoreResult<Vec<PersonShotMatch>> {
        let person_keys = self.store.keys(keys::PERSON_SHOT_PREFIX)?;
        let mut shots: HashMap<String, Option<VideoShot>> = HashMap::new();
        let mut matches = Vec::with_capacity(person_keys.len());

        for (index, key) in person_keys.iter().enumerate() {
            let Some(region_id) = keys::strip(key, keys::PERSON_SHOT_PREFIX) else {
                continue;
            };
            let Some(record) = skip_unusable(self.person_shot(region_id))? else {
                continue;
            };

            let shot_id = record.shot_id();
            let shot = match shots.get(&shot_id) {
                Some(cached) => cached.clone(),
                None => {
                    let loaded = skip_unusable(self.video_shot(&shot_id))?;
                    shots.insert(shot_id.clone(), loaded.clone());
                    loaded
                }
            };
            let Some(shot) = shot else {
                debug!(region_id, shot_id = %shot_id, "Skipping person shot without usable video shot");
                continue;
            };

            matches.push(PersonShotMatch::new(query_id, &record, &shot, index));
        }

        info!(
            query_id,
            matched = matches.len(),
            scanned = person_keys.len(),
            "Searched person shots"
        );
        Ok(matches)
    }
}

/// Turn per-record failures into a skip, keeping backend failures fatal.
fn skip_unusable<T>(result: StoreResult<T>) -> StoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound(key)) => {
            debug!(key = %key, "Record disappeared during listing");
            Ok(None)
        }
        Err(StoreError::MalformedRecord { key, source }) => {
            warn!(key = %key, error = %source, "Skipping malformed record");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::Fields;
    use gee_models::timestamp::parse_store_timestamp;

    fn catalog() -> (Arc<MemoryStore>, MetadataCatalog) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), MetadataCatalog::new(store))
    }

    fn shot(id: &str, camera_id: &str) -> VideoShot {
        VideoShot {
            id: id.to_string(),
            camera_id: camera_id.to_string(),
            format: "mp4".to_string(),
            codec: "h264".to_string(),
            fps: 30.0,
            frames: 18078,
            start_time: parse_store_timestamp("20151010140000").unwrap(),
            end_time: parse_store_timestamp("20151010141000").unwrap(),
        }
    }

    fn person(id: &str, cam_id: &str, video_id: &str) -> PersonShotRecord {
        PersonShotRecord {
            id: id.to_string(),
            cam_id: cam_id.to_string(),
            video_id: video_id.to_string(),
            rect: String::new(),
            frame_id: format!("{}{}00500", cam_id, video_id),
            frame_pos: 500,
        }
    }

    #[test]
    fn test_video_shot_round_trip() {
        let (_, catalog) = catalog();
        let original = shot("c0a8719320151010140000", "c0a87193");
        catalog.save_video_shot(&original).unwrap();
        assert_eq!(catalog.video_shot(&original.id).unwrap(), original);
    }

    #[test]
    fn test_unknown_shot_is_not_found() {
        let (_, catalog) = catalog();
        assert!(catalog.video_shot("zzz").unwrap_err().is_not_found());
        assert!(catalog.shot_location("zzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_listing_skips_malformed_records() {
        let (store, catalog) = catalog();
        catalog.save_video_shot(&shot("a", "c0a87193")).unwrap();
        catalog.save_video_shot(&shot("c", "c0a87194")).unwrap();

        let mut broken = Fields::new();
        broken.insert("cam_id".to_string(), "c0a87195".to_string());
        store.put("vs:b", &broken).unwrap();

        let listing = catalog.list_video_shots().unwrap();
        let ids: Vec<&str> = listing.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(listing[1].camera.index, 1);
        assert_eq!(listing[1].camera.ip, "192.168.113.148");
    }

    #[test]
    fn test_frame_count_is_lenient() {
        let (store, catalog) = catalog();
        let mut fields = Fields::new();
        fields.insert("frames".to_string(), "240".to_string());
        store.put("vs:partial", &fields).unwrap();
        assert_eq!(catalog.shot_frame_count("partial").unwrap(), Some(240));
        assert!(catalog.video_shot("partial").is_err());

        fields.insert("frames".to_string(), "lots".to_string());
        store.put("vs:partial", &fields).unwrap();
        assert_eq!(catalog.shot_frame_count("partial").unwrap(), None);

        store.put("vs:bare", &Fields::new()).unwrap();
        assert_eq!(catalog.shot_frame_count("bare").unwrap(), None);

        assert!(catalog.shot_frame_count("zzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_joins_owning_shot() {
        let (_, catalog) = catalog();
        catalog
            .save_video_shot(&shot("c0a8719320151010140000", "c0a87193"))
            .unwrap();
        catalog
            .save_person_shot(&person("p1", "c0a87193", "20151010140000"))
            .unwrap();
        // Owning shot missing
        catalog
            .save_person_shot(&person("p2", "c0a87194", "20151010140000"))
            .unwrap();
        catalog
            .save_person_shot(&person("p3", "c0a87193", "20151010140000"))
            .unwrap();

        let matches = catalog.search_person_shots("query").unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.id == "query"));
        assert_eq!(matches[0].frame_pos, "500");
        assert_eq!(matches[0].video_shot.time_range.start_time, "2015-10-10 14:00:00");
        assert_eq!(matches[0].camera.index, 0);
        // p2 was skipped but still occupies index 1
        assert_eq!(matches[1].camera.index, 2);
    }

    #[test]
    fn test_search_index_follows_key_position() {
        let (store, catalog) = catalog();
        catalog
            .save_video_shot(&shot("c0a8719320151010140000", "c0a87193"))
            .unwrap();
        let mut broken = Fields::new();
        broken.insert("cam_id".to_string(), "c0a87193".to_string());
        store.put("ps:a", &broken).unwrap();
        catalog
            .save_person_shot(&person("b", "c0a87193", "20151010140000"))
            .unwrap();

        let matches = catalog.search_person_shots("q42").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "q42");
        assert_eq!(matches[0].camera.index, 1);
    }
}
