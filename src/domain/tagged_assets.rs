// src/domain/tagged_assets.rs
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from tag name to the asset URLs filed under it.
///
/// Tags keep insertion order and so do the URLs of each tag. URLs are not
/// deduplicated. Maps built through [`add_images_to_tag`] and
/// [`remove_image_from_tag`] never hold a tag with an empty list; maps decoded
/// from persisted data may, which is why [`get_available_tags`] filters them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedAssetMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TaggedAssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs filed under `tag`, if the tag exists
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == tag)
            .map(|(_, urls)| urls.as_slice())
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// All tag keys in insertion order, including tags with empty lists
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, urls)| (key.as_str(), urls.as_slice()))
    }

    /// Number of tag keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of URLs across all tags
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|(_, urls)| urls.len()).sum()
    }

    /// Sets the list for `tag`, keeping its position if it already exists
    pub fn insert(&mut self, tag: impl Into<String>, urls: Vec<String>) {
        let tag = tag.into();
        match self.entries.iter_mut().find(|(key, _)| *key == tag) {
            Some((_, existing)) => *existing = urls,
            None => self.entries.push((tag, urls)),
        }
    }

    /// Removes `tag` and returns its list
    pub fn remove(&mut self, tag: &str) -> Option<Vec<String>> {
        let position = self.entries.iter().position(|(key, _)| key == tag)?;
        Some(self.entries.remove(position).1)
    }

    /// Copy without the tags whose list is empty
    pub fn pruned(&self) -> TaggedAssetMap {
        TaggedAssetMap {
            entries: self
                .entries
                .iter()
                .filter(|(_, urls)| !urls.is_empty())
                .cloned()
                .collect(),
        }
    }

    fn urls_mut(&mut self, tag: &str) -> &mut Vec<String> {
        let position = match self.entries.iter().position(|(key, _)| key == tag) {
            Some(position) => position,
            None => {
                self.entries.push((tag.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }
}

impl<K, V> FromIterator<(K, V)> for TaggedAssetMap
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TaggedAssetMap::new();
        for (tag, urls) in iter {
            map.insert(tag, urls.into_iter().map(Into::into).collect());
        }
        map
    }
}

impl Serialize for TaggedAssetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, urls) in &self.entries {
            map.serialize_entry(tag, urls)?;
        }
        map.end()
    }
}

struct TaggedAssetMapVisitor;

impl<'de> Visitor<'de> for TaggedAssetMapVisitor {
    type Value = TaggedAssetMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping tag names to arrays of URL strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = TaggedAssetMap::new();
        while let Some((tag, urls)) = access.next_entry::<String, Vec<String>>()? {
            map.insert(tag, urls);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for TaggedAssetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TaggedAssetMapVisitor)
    }
}

/// Tags that currently hold at least one asset, in insertion order.
pub fn get_available_tags(map: Option<&TaggedAssetMap>) -> Vec<String> {
    map.map(|map| {
        map.iter()
            .filter(|(_, urls)| !urls.is_empty())
            .map(|(tag, _)| tag.to_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Returns a copy of `map` with `new_urls` appended to `tag`. Performs no validation.
pub fn add_images_to_tag(
    map: Option<&TaggedAssetMap>,
    tag: &str,
    new_urls: &[String],
) -> TaggedAssetMap {
    let mut updated = map.cloned().unwrap_or_default();
    updated.urls_mut(tag).extend(new_urls.iter().cloned());
    updated
}

/// Returns a copy of `map` without any occurrence of `url` under `tag`.
///
/// The tag key is dropped when its list ends up empty.
pub fn remove_image_from_tag(map: &TaggedAssetMap, tag: &str, url: &str) -> TaggedAssetMap {
    let mut updated = map.clone();
    let now_empty = match updated.entries.iter_mut().find(|(key, _)| key == tag) {
        Some((_, urls)) => {
            urls.retain(|existing| existing != url);
            urls.is_empty()
        }
        None => false,
    };
    if now_empty {
        updated.remove(tag);
    }
    updated
}

/// Returns a copy of `map` without `tag`, or `None` once no tag is left.
pub fn remove_tag(map: &TaggedAssetMap, tag: &str) -> Option<TaggedAssetMap> {
    let mut updated = map.clone();
    updated.remove(tag);
    if updated.is_empty() {
        None
    } else {
        Some(updated)
    }
}

pub fn count_for_tag(map: Option<&TaggedAssetMap>, tag: &str) -> usize {
    map.and_then(|map| map.get(tag)).map_or(0, <[String]>::len)
}

pub fn total_count(map: Option<&TaggedAssetMap>) -> usize {
    map.map_or(0, TaggedAssetMap::total_count)
}
