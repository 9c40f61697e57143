// src/application/services/tagged_asset_service_impl.rs
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::tagged_asset_service::{
    RecordRef, RemovalOutcome, TaggedAssetService,
};
use crate::domain::asset_store::TaggedAssetStore;
use crate::domain::limits::{check_upload_limits, AssetLimits};
use crate::domain::persisted::{convert_for_database, convert_to_tagged_images};
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::object_store::ObjectStore;
use crate::domain::tag::{format_tag_name, Tag};
use crate::domain::tagged_assets::{
    add_images_to_tag, get_available_tags, remove_image_from_tag, remove_tag, TaggedAssetMap,
};
use crate::domain::upload::{AssetFile, UploadOptions};

#[derive(Debug)]
pub struct TaggedAssetServiceImpl {
    store: TaggedAssetStore,
    documents: Arc<dyn DocumentStore>,
    bucket: String,
    limits: AssetLimits,
}

impl TaggedAssetServiceImpl {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
        bucket: impl Into<String>,
        limits: AssetLimits,
    ) -> Self {
        debug!("Creating new TaggedAssetServiceImpl");
        Self {
            store: TaggedAssetStore::new(object_store),
            documents,
            bucket: bucket.into(),
            limits,
        }
    }

    /// Writes `images` without empty tags; a map without any URL is written as `null`
    fn persist(&self, record: &RecordRef, images: Option<&TaggedAssetMap>) -> ApplicationResult<()> {
        let images = images.and_then(settled);
        self.documents
            .update_field(
                &record.table,
                &record.record_id,
                &record.field,
                convert_for_database(images.as_ref()),
            )
            .map_err(|e| ApplicationError::Domain(e).context(format!("saving {}", record)))
    }

    /// The key under which `tag` is stored: exact match first, then the formatted name
    fn resolve_tag(map: &TaggedAssetMap, tag: &str) -> Option<String> {
        if map.contains_tag(tag) {
            return Some(tag.to_string());
        }
        let formatted = format_tag_name(tag);
        map.contains_tag(&formatted).then_some(formatted)
    }

    fn load_existing_tag(
        &self,
        record: &RecordRef,
        tag: &str,
    ) -> ApplicationResult<(TaggedAssetMap, String)> {
        let current = self
            .load_images(record)?
            .ok_or_else(|| ApplicationError::NotFound(format!("{} has no images", record)))?;
        let key = Self::resolve_tag(&current, tag)
            .ok_or_else(|| ApplicationError::NotFound(format!("tag '{}' on {}", tag, record)))?;
        Ok((current, key))
    }
}

/// `map` without empty tags, `None` once nothing is left
fn settled(map: &TaggedAssetMap) -> Option<TaggedAssetMap> {
    let pruned = map.pruned();
    (!pruned.is_empty()).then_some(pruned)
}

impl TaggedAssetService for TaggedAssetServiceImpl {
    #[instrument(skip(self), level = "debug", fields(record = %record))]
    fn load_images(&self, record: &RecordRef) -> ApplicationResult<Option<TaggedAssetMap>> {
        let raw = self
            .documents
            .get_field(&record.table, &record.record_id, &record.field)?;
        Ok(convert_to_tagged_images(&raw))
    }

    #[instrument(skip(self, files), level = "debug", fields(record = %record, count = files.len()))]
    fn add_images(
        &self,
        record: &RecordRef,
        tag: &str,
        files: &[AssetFile],
        folder: Option<&str>,
    ) -> ApplicationResult<TaggedAssetMap> {
        let tag = Tag::new(tag).map_err(ApplicationError::from_domain)?;
        if files.is_empty() {
            return Err(ApplicationError::Validation("no files selected".to_string()));
        }

        let current = self.load_images(record)?;
        check_upload_limits(current.as_ref(), tag.value(), files.len(), &self.limits)
            .map_err(ApplicationError::from_domain)?;

        let options = UploadOptions {
            bucket: self.bucket.clone(),
            folder: folder.map(str::to_string),
            tag: tag.value().to_string(),
        };
        let result = self.store.upload_tagged_files(files, &options);
        if !result.success {
            if !result.urls.is_empty() {
                warn!(
                    "{} uploaded files left unreferenced in {}: {:?}",
                    result.urls.len(),
                    self.bucket,
                    result.urls
                );
            }
            return Err(ApplicationError::Upload(
                result
                    .error
                    .unwrap_or_else(|| "unknown upload error".to_string()),
            ));
        }

        let updated = add_images_to_tag(current.as_ref(), tag.value(), &result.urls).pruned();
        self.persist(record, Some(&updated))?;
        debug!("Added {} images under '{}' to {}", result.urls.len(), tag, record);
        Ok(updated)
    }

    #[instrument(skip(self), level = "debug", fields(record = %record))]
    fn remove_image(
        &self,
        record: &RecordRef,
        tag: &str,
        url: &str,
    ) -> ApplicationResult<RemovalOutcome> {
        let (current, key) = self.load_existing_tag(record, tag)?;
        let referenced = current
            .get(&key)
            .is_some_and(|urls| urls.iter().any(|u| u == url));
        if !referenced {
            return Err(ApplicationError::NotFound(format!(
                "image {} under tag '{}'",
                url, key
            )));
        }

        let mut storage_errors = Vec::new();
        let deleted = self.store.delete_image_from_storage(&self.bucket, url);
        if !deleted.success {
            // the reference is dropped even when the object stays behind
            let error = deleted.error.unwrap_or_else(|| "unknown delete error".to_string());
            warn!("Removing {} from {} despite storage error: {}", url, record, error);
            storage_errors.push(error);
        }

        let images = settled(&remove_image_from_tag(&current, &key, url));
        self.persist(record, images.as_ref())?;

        Ok(RemovalOutcome {
            images,
            storage_errors,
        })
    }

    #[instrument(skip(self), level = "debug", fields(record = %record))]
    fn remove_tag(&self, record: &RecordRef, tag: &str) -> ApplicationResult<RemovalOutcome> {
        let (current, key) = self.load_existing_tag(record, tag)?;

        let storage_errors: Vec<String> = current
            .get(&key)
            .unwrap_or_default()
            .iter()
            .filter_map(|url| {
                let deleted = self.store.delete_image_from_storage(&self.bucket, url);
                deleted.error.filter(|_| !deleted.success)
            })
            .collect();
        if !storage_errors.is_empty() {
            warn!(
                "Tag '{}' removed from {} with {} storage errors",
                key,
                record,
                storage_errors.len()
            );
        }

        let images = remove_tag(&current, &key).as_ref().and_then(settled);
        self.persist(record, images.as_ref())?;

        Ok(RemovalOutcome {
            images,
            storage_errors,
        })
    }

    #[instrument(skip(self), level = "debug", fields(record = %record))]
    fn list_tags(&self, record: &RecordRef) -> ApplicationResult<Vec<(String, usize)>> {
        let images = self.load_images(record)?;
        Ok(get_available_tags(images.as_ref())
            .into_iter()
            .map(|tag| {
                let count = images
                    .as_ref()
                    .and_then(|map| map.get(&tag))
                    .map_or(0, <[String]>::len);
                (tag, count)
            })
            .collect())
    }

    fn limits(&self) -> AssetLimits {
        self.limits
    }
}
