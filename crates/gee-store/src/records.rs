//! Marshaling between store records and typed models.
//!
//! Every value crosses the store boundary as text. Numbers and timestamps are
//! parsed here, one field at a time, so a single bad field surfaces as a
//! `RecordError` naming it.

use std::str::FromStr;

use gee_models::timestamp::{format_store_timestamp, parse_store_timestamp};
use gee_models::{PersonShotRecord, ShotLocation, VideoShot};
use thiserror::Error;

use crate::store::Fields;

/// Field names used in store records.
pub mod field {
    pub const CAM_ID: &str = "cam_id";
    pub const FORMAT: &str = "format";
    pub const CODEC: &str = "codec";
    pub const FPS: &str = "fps";
    pub const FRAMES: &str = "frames";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const PATH: &str = "path";
    pub const FILENAME: &str = "filename";
    pub const VIDEO_ID: &str = "video_id";
    pub const RECT: &str = "rect";
    pub const FRAME_ID: &str = "frame_id";
    pub const FRAME_POS: &str = "frame_pos";
}

/// A record that cannot be turned into its model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value '{value}' for field '{field}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

fn required<'a>(fields: &'a Fields, name: &'static str) -> Result<&'a str, RecordError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or(RecordError::MissingField(name))
}

fn parsed<T>(fields: &Fields, name: &'static str) -> Result<T, RecordError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(fields, name)?;
    raw.trim().parse().map_err(|e: T::Err| RecordError::InvalidField {
        field: name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn timestamp(fields: &Fields, name: &'static str) -> Result<chrono::NaiveDateTime, RecordError> {
    let raw = required(fields, name)?;
    parse_store_timestamp(raw).map_err(|e| RecordError::InvalidField {
        field: name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn pairs<const N: usize>(items: [(&str, String); N]) -> Fields {
    items
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Build a `VideoShot` from its `vs:` record.
pub fn video_shot_from_fields(shot_id: &str, fields: &Fields) -> Result<VideoShot, RecordError> {
    let fps: f64 = parsed(fields, field::FPS)?;
    if !fps.is_finite() || fps < 0.0 {
        return Err(RecordError::InvalidField {
            field: field::FPS,
            value: fps.to_string(),
            reason: "frame rate must be a non-negative number".to_string(),
        });
    }

    Ok(VideoShot {
        id: shot_id.to_string(),
        camera_id: required(fields, field::CAM_ID)?.to_string(),
        format: required(fields, field::FORMAT)?.to_string(),
        codec: required(fields, field::CODEC)?.to_string(),
        fps,
        frames: parsed(fields, field::FRAMES)?,
        start_time: timestamp(fields, field::START_TIME)?,
        end_time: timestamp(fields, field::END_TIME)?,
    })
}

/// Read only the `frames` field of a `vs:` record.
pub fn frame_count_from_fields(fields: &Fields) -> Result<u64, RecordError> {
    parsed(fields, field::FRAMES)
}

/// Render a `VideoShot` as its `vs:` record.
pub fn video_shot_to_fields(shot: &VideoShot) -> Fields {
    pairs([
        (field::CAM_ID, shot.camera_id.clone()),
        (field::FORMAT, shot.format.clone()),
        (field::CODEC, shot.codec.clone()),
        (field::FPS, shot.fps.to_string()),
        (field::FRAMES, shot.frames.to_string()),
        (field::START_TIME, format_store_timestamp(&shot.start_time)),
        (field::END_TIME, format_store_timestamp(&shot.end_time)),
    ])
}

/// Build a `ShotLocation` from its `vsb:` record.
pub fn shot_location_from_fields(fields: &Fields) -> Result<ShotLocation, RecordError> {
    Ok(ShotLocation::new(
        required(fields, field::PATH)?,
        required(fields, field::FILENAME)?,
    ))
}

/// Render a `ShotLocation` as its `vsb:` record.
pub fn shot_location_to_fields(location: &ShotLocation) -> Fields {
    pairs([
        (field::PATH, location.path.clone()),
        (field::FILENAME, location.filename.clone()),
    ])
}

/// Build a `PersonShotRecord` from its `ps:` record.
pub fn person_shot_from_fields(
    region_id: &str,
    fields: &Fields,
) -> Result<PersonShotRecord, RecordError> {
    Ok(PersonShotRecord {
        id: region_id.to_string(),
        cam_id: required(fields, field::CAM_ID)?.to_string(),
        video_id: required(fields, field::VIDEO_ID)?.to_string(),
        rect: required(fields, field::RECT)?.to_string(),
        frame_id: required(fields, field::FRAME_ID)?.to_string(),
        frame_pos: parsed(fields, field::FRAME_POS)?,
    })
}

/// Render a `PersonShotRecord` as its `ps:` record.
pub fn person_shot_to_fields(record: &PersonShotRecord) -> Fields {
    pairs([
        (field::CAM_ID, record.cam_id.clone()),
        (field::VIDEO_ID, record.video_id.clone()),
        (field::RECT, record.rect.clone()),
        (field::FRAME_ID, record.frame_id.clone()),
        (field::FRAME_POS, record.frame_pos.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot_fields() -> Fields {
        pairs([
            (field::CAM_ID, "c0a87193".to_string()),
            (field::FORMAT, "mp4".to_string()),
            (field::CODEC, "h264".to_string()),
            (field::FPS, "30".to_string()),
            (field::FRAMES, "18078".to_string()),
            (field::START_TIME, "20151010142000".to_string()),
            (field::END_TIME, "20151010143000".to_string()),
        ])
    }

    #[test]
    fn test_video_shot_round_trip() {
        let shot = video_shot_from_fields("abc123", &shot_fields()).unwrap();
        assert_eq!(shot.frames, 18078);
        assert_eq!(shot.fps, 30.0);
        assert_eq!(
            gee_models::format_display_timestamp(&shot.start_time),
            "2015-10-10 14:20:00"
        );
        assert_eq!(video_shot_to_fields(&shot), shot_fields());
    }

    #[test]
    fn test_fractional_fps_round_trip() {
        let mut fields = shot_fields();
        fields.insert(field::FPS.to_string(), "29.97".to_string());
        let shot = video_shot_from_fields("abc123", &fields).unwrap();
        assert_eq!(video_shot_to_fields(&shot)[field::FPS], "29.97");
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut fields = shot_fields();
        fields.remove(field::CODEC);
        assert_eq!(
            video_shot_from_fields("abc123", &fields),
            Err(RecordError::MissingField(field::CODEC))
        );
    }

    #[test]
    fn test_invalid_numbers_and_timestamps() {
        let mut fields = shot_fields();
        fields.insert(field::FRAMES.to_string(), "-1".to_string());
        assert!(matches!(
            video_shot_from_fields("abc123", &fields),
            Err(RecordError::InvalidField { field: "frames", .. })
        ));

        let mut fields = shot_fields();
        fields.insert(field::END_TIME.to_string(), "yesterday".to_string());
        assert!(matches!(
            video_shot_from_fields("abc123", &fields),
            Err(RecordError::InvalidField { field: "end_time", .. })
        ));

        let mut fields = shot_fields();
        fields.insert(field::FPS.to_string(), "NaN".to_string());
        assert!(matches!(
            video_shot_from_fields("abc123", &fields),
            Err(RecordError::InvalidField { field: "fps", .. })
        ));
    }

    #[test]
    fn test_location_requires_both_fields() {
        let fields = pairs([(field::PATH, "/videos".to_string())]);
        assert_eq!(
            shot_location_from_fields(&fields),
            Err(RecordError::MissingField(field::FILENAME))
        );
    }

    #[test]
    fn test_person_shot_round_trip() {
        let record = PersonShotRecord {
            id: "c0a87193201510101420000050100".to_string(),
            cam_id: "c0a87193".to_string(),
            video_id: "20151010142000".to_string(),
            rect: "10,10,50,100".to_string(),
            frame_id: "c0a871932015101014200000501".to_string(),
            frame_pos: 500,
        };
        let fields = person_shot_to_fields(&record);
        assert_eq!(person_shot_from_fields(&record.id, &fields).unwrap(), record);
    }
}
