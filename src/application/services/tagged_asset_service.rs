// src/application/services/tagged_asset_service.rs
use std::fmt;

use crate::application::error::ApplicationResult;
use crate::domain::limits::AssetLimits;
use crate::domain::tagged_assets::TaggedAssetMap;
use crate::domain::upload::AssetFile;

/// The JSON column holding a record's tagged images
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    pub table: String,
    pub record_id: String,
    pub field: String,
}

impl RecordRef {
    pub fn new(
        table: impl Into<String>,
        record_id: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            record_id: record_id.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.table, self.record_id, self.field)
    }
}

/// Result of a removal that went through even if storage cleanup did not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// The map as persisted after the removal (`None` once no tag is left)
    pub images: Option<TaggedAssetMap>,
    /// Storage deletions that failed; their objects are orphaned
    pub storage_errors: Vec<String>,
}

impl RemovalOutcome {
    pub fn storage_clean(&self) -> bool {
        self.storage_errors.is_empty()
    }
}

/// Service interface for the tagged images of a record
pub trait TaggedAssetService: Send + Sync + fmt::Debug {
    /// Read the record's images, migrating the legacy array shape on the fly
    fn load_images(&self, record: &RecordRef) -> ApplicationResult<Option<TaggedAssetMap>>;

    /// Validate, upload and merge `files` under `tag`, then persist the record
    fn add_images(
        &self,
        record: &RecordRef,
        tag: &str,
        files: &[AssetFile],
        folder: Option<&str>,
    ) -> ApplicationResult<TaggedAssetMap>;

    /// Remove one image from storage and from the record
    fn remove_image(&self, record: &RecordRef, tag: &str, url: &str)
        -> ApplicationResult<RemovalOutcome>;

    /// Remove a whole tag with all of its images
    fn remove_tag(&self, record: &RecordRef, tag: &str) -> ApplicationResult<RemovalOutcome>;

    /// Tags holding at least one image, with their counts
    fn list_tags(&self, record: &RecordRef) -> ApplicationResult<Vec<(String, usize)>>;

    fn limits(&self) -> AssetLimits;
}
