// src/domain/persisted.rs
//! Boundary between the JSON column on business records and [`TaggedAssetMap`].
//!
//! Older records store a flat array of URLs; newer ones store a tag map.
//! Both are read, only the tag map is written.
use serde_json::Value;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::tagged_assets::TaggedAssetMap;

/// Tag that legacy flat URL arrays are filed under
pub const DEFAULT_TAG: &str = "Portfolio";

/// The shapes a persisted image field can take
#[derive(Debug, Clone, PartialEq)]
pub enum PersistedImages {
    Absent,
    LegacyArray(Vec<String>),
    TagMap(TaggedAssetMap),
    Malformed(String),
}

impl PersistedImages {
    pub fn decode(raw: &Value) -> Self {
        match raw {
            Value::Null => PersistedImages::Absent,
            Value::Array(items) => {
                let urls: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                match urls {
                    Some(urls) => PersistedImages::LegacyArray(urls),
                    None => PersistedImages::Malformed(
                        "legacy image array contains non-string entries".to_string(),
                    ),
                }
            }
            Value::Object(_) => match serde_json::from_value::<TaggedAssetMap>(raw.clone()) {
                Ok(map) => PersistedImages::TagMap(map),
                Err(e) => PersistedImages::Malformed(e.to_string()),
            },
            other => PersistedImages::Malformed(format!("unexpected JSON value: {}", other)),
        }
    }

    /// Canonical map for the decoded shape. Malformed data reads as "no images".
    pub fn into_tagged(self) -> Option<TaggedAssetMap> {
        match self {
            PersistedImages::Absent => None,
            PersistedImages::LegacyArray(urls) if urls.is_empty() => None,
            PersistedImages::LegacyArray(urls) => {
                let mut map = TaggedAssetMap::new();
                map.insert(DEFAULT_TAG, urls);
                Some(map)
            }
            PersistedImages::TagMap(map) => Some(map),
            PersistedImages::Malformed(reason) => {
                warn!("{}. Treating as no images.", DomainError::MalformedData(reason));
                None
            }
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, PersistedImages::LegacyArray(_))
    }
}

pub fn convert_to_tagged_images(raw: &Value) -> Option<TaggedAssetMap> {
    PersistedImages::decode(raw).into_tagged()
}

pub fn convert_for_database(map: Option<&TaggedAssetMap>) -> Value {
    match map {
        Some(map) => serde_json::to_value(map).unwrap_or(Value::Null),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_legacy_array_when_convert_then_wraps_under_portfolio() {
        let map = convert_to_tagged_images(&json!(["url1", "url2"])).unwrap();
        assert_eq!(convert_for_database(Some(&map)), json!({"Portfolio": ["url1", "url2"]}));
    }

    #[test]
    fn given_null_when_convert_then_none() {
        assert!(convert_to_tagged_images(&Value::Null).is_none());
        assert_eq!(convert_for_database(None), Value::Null);
    }

    #[test]
    fn given_tag_map_when_convert_then_unchanged() {
        let raw = json!({"Exterior": ["u"]});
        let map = convert_to_tagged_images(&raw).unwrap();
        assert_eq!(map.get("Exterior"), Some(["u".to_string()].as_slice()));
        assert_eq!(convert_for_database(Some(&map)), raw);
    }

    #[test]
    fn given_canonical_map_when_round_trip_then_identity() {
        let raw = json!({"Zeta": ["z1"], "Alpha": ["a1", "a2"], "Empty": []});
        let round_trip = convert_for_database(convert_to_tagged_images(&raw).as_ref());
        assert_eq!(round_trip, raw);
        assert_eq!(
            serde_json::to_string(&round_trip).unwrap(),
            serde_json::to_string(&raw).unwrap()
        );
    }

    #[test]
    fn given_legacy_array_when_round_trip_then_normalizes() {
        let raw = json!(["a", "b"]);
        let round_trip = convert_for_database(convert_to_tagged_images(&raw).as_ref());
        assert_ne!(round_trip, raw);
        assert!(round_trip.is_object());
    }

    #[test]
    fn given_malformed_values_when_convert_then_none() {
        assert!(convert_to_tagged_images(&json!(42)).is_none());
        assert!(convert_to_tagged_images(&json!("just a string")).is_none());
        assert!(convert_to_tagged_images(&json!([1, 2])).is_none());
        assert!(convert_to_tagged_images(&json!({"Exterior": "not-a-list"})).is_none());
        assert!(matches!(
            PersistedImages::decode(&json!(true)),
            PersistedImages::Malformed(_)
        ));
    }

    #[test]
    fn given_empty_legacy_array_when_convert_then_none() {
        assert!(PersistedImages::decode(&json!([])).is_legacy());
        assert!(convert_to_tagged_images(&json!([])).is_none());
    }
}
