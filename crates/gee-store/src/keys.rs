//! Key-space conventions.
//!
//! | Prefix | Record |
//! |--------|--------|
//! | `vs:`  | video shot metadata |
//! | `vsb:` | physical location `{path, filename}` |
//! | `ps:`  | previously extracted person shots |

pub const VIDEO_SHOT_PREFIX: &str = "vs:";
pub const SHOT_LOCATION_PREFIX: &str = "vsb:";
pub const PERSON_SHOT_PREFIX: &str = "ps:";

pub fn video_shot(shot_id: &str) -> String {
    format!("{}{}", VIDEO_SHOT_PREFIX, shot_id)
}

pub fn shot_location(shot_id: &str) -> String {
    format!("{}{}", SHOT_LOCATION_PREFIX, shot_id)
}

pub fn person_shot(region_id: &str) -> String {
    format!("{}{}", PERSON_SHOT_PREFIX, region_id)
}

/// Strip `prefix` from `key`, returning the bare identifier.
pub fn strip<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builders() {
        assert_eq!(video_shot("abc123"), "vs:abc123");
        assert_eq!(shot_location("abc123"), "vsb:abc123");
        assert_eq!(person_shot("abc1230050000"), "ps:abc1230050000");
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("vs:abc123", VIDEO_SHOT_PREFIX), Some("abc123"));
        assert_eq!(strip("vs:", VIDEO_SHOT_PREFIX), None);
        assert_eq!(strip("vsb:abc123", VIDEO_SHOT_PREFIX), None);
    }
}
