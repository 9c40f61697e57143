// src/domain/limits.rs
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tagged_assets::{count_for_tag, total_count, TaggedAssetMap};

/// Caps applied before an upload batch is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssetLimits {
    /// Maximum number of images under a single tag (default: 10)
    #[serde(default = "default_max_per_tag")]
    pub max_per_tag: usize,

    /// Maximum number of images across all tags of a record (default: 50)
    #[serde(default = "default_max_total")]
    pub max_total: usize,
}

fn default_max_per_tag() -> usize {
    10
}

fn default_max_total() -> usize {
    50
}

impl Default for AssetLimits {
    fn default() -> Self {
        Self {
            max_per_tag: default_max_per_tag(),
            max_total: default_max_total(),
        }
    }
}

/// Rejects a batch of `incoming` images for `tag` that would break either cap.
pub fn check_upload_limits(
    map: Option<&TaggedAssetMap>,
    tag: &str,
    incoming: usize,
    limits: &AssetLimits,
) -> DomainResult<()> {
    let in_tag = count_for_tag(map, tag);
    if in_tag + incoming > limits.max_per_tag {
        return Err(DomainError::LimitExceeded(format!(
            "tag '{}' holds {} of {} images, cannot add {} more",
            tag, in_tag, limits.max_per_tag, incoming
        )));
    }

    let total = total_count(map);
    if total + incoming > limits.max_total {
        return Err(DomainError::LimitExceeded(format!(
            "record holds {} of {} images, cannot add {} more",
            total, limits.max_total, incoming
        )));
    }

    Ok(())
}
