// src/domain/asset_store.rs
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::repositories::object_store::ObjectStore;
use crate::domain::upload::{
    generate_storage_path, AssetFile, DeleteResult, UploadOptions, UploadResult,
};

/// Uploads and deletes tagged assets in an object store.
///
/// Never touches the persisted map; callers merge the returned URLs and write
/// the record themselves. Results are values, failures included.
#[derive(Debug, Clone)]
pub struct TaggedAssetStore {
    object_store: Arc<dyn ObjectStore>,
}

impl TaggedAssetStore {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        debug!("Creating new TaggedAssetStore");
        Self { object_store }
    }

    /// Uploads `files` one at a time under `[folder/]tag/`.
    ///
    /// Stops at the first failing file. Files uploaded before it are not
    /// rolled back. The tag is not re-validated here.
    #[instrument(skip(self, files), level = "debug", fields(count = files.len(), bucket = %options.bucket, tag = %options.tag))]
    pub fn upload_tagged_files(&self, files: &[AssetFile], options: &UploadOptions) -> UploadResult {
        let mut urls = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            let path = generate_storage_path(options.folder.as_deref(), &options.tag, file);
            debug!("Uploading {} to {}/{}", file.name, options.bucket, path);

            if let Err(e) = self.object_store.upload(&options.bucket, &path, &file.data) {
                warn!(
                    "Upload of {} failed after {} successful uploads: {}",
                    file.name,
                    urls.len(),
                    e
                );
                return UploadResult::failed(
                    urls,
                    options.tag.clone(),
                    index,
                    DomainError::Upload(format!(
                        "{} (file {} of {}): {}",
                        file.name,
                        index + 1,
                        files.len(),
                        e
                    ))
                    .to_string(),
                );
            }

            urls.push(self.object_store.public_url(&options.bucket, &path));
        }

        UploadResult::succeeded(urls, options.tag.clone())
    }

    /// Deletes the object behind a public URL.
    #[instrument(skip(self), level = "debug")]
    pub fn delete_image_from_storage(&self, bucket: &str, url: &str) -> DeleteResult {
        let path = match self.object_store.storage_path(bucket, url) {
            Ok(path) => path,
            Err(e) => {
                warn!("Cannot map URL to storage path: {}", e);
                return DeleteResult::failed(e.to_string());
            }
        };

        match self.object_store.delete(bucket, &path) {
            Ok(()) => {
                debug!("Deleted {}/{}", bucket, path);
                DeleteResult::succeeded()
            }
            Err(e) => {
                warn!("Delete of {}/{} failed: {}", bucket, path, e);
                DeleteResult::failed(format!("Failed to delete {}: {}", path, e))
            }
        }
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_store.public_url(bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tagged_assets::add_images_to_tag;
    use crate::domain::upload::UploadOptionsBuilder;
    use crate::infrastructure::storage::memory_object_store::InMemoryObjectStore;
    use crate::util::testing::{init_test_env, FailingObjectStore};

    fn options(tag: &str) -> UploadOptions {
        UploadOptionsBuilder::default()
            .bucket("b")
            .tag(tag)
            .build()
            .unwrap()
    }

    fn files(n: usize) -> Vec<AssetFile> {
        (0..n)
            .map(|i| AssetFile::new(format!("file{}.jpg", i), vec![i as u8; 4]))
            .collect()
    }

    #[test]
    fn given_always_succeeding_store_when_upload_then_returns_urls_in_order() {
        let _ = init_test_env();
        let object_store = Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap());
        let store = TaggedAssetStore::new(object_store.clone());

        let result = store.upload_tagged_files(&files(2), &options("Exterior"));

        assert!(result.success);
        assert_eq!(result.tag, "Exterior");
        assert_eq!(result.urls.len(), 2);
        assert!(result.error.is_none());
        let paths = object_store.paths("b");
        assert_eq!(paths.len(), 2);
        for (url, path) in result.urls.iter().zip(paths) {
            assert_eq!(url, &object_store.public_url("b", &path));
        }

        let map = add_images_to_tag(None, "Exterior", &result.urls);
        assert_eq!(map.get("Exterior"), Some(result.urls.as_slice()));
    }

    #[test]
    fn given_folder_when_upload_then_paths_are_prefixed() {
        let _ = init_test_env();
        let object_store = Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap());
        let store = TaggedAssetStore::new(object_store.clone());
        let options = UploadOptionsBuilder::default()
            .bucket("b")
            .folder("vendor-1")
            .tag("Exterior")
            .build()
            .unwrap();

        let result = store.upload_tagged_files(&files(1), &options);

        assert!(result.success);
        assert!(object_store.paths("b")[0].starts_with("vendor-1/Exterior/"));
    }

    #[test]
    fn given_store_failing_on_second_file_when_upload_then_reports_failure() {
        let _ = init_test_env();
        let object_store = Arc::new(FailingObjectStore::failing_on(2));
        let store = TaggedAssetStore::new(object_store.clone());

        let result = store.upload_tagged_files(&files(3), &options("Exterior"));

        assert!(!result.success);
        assert!(!result.error.as_deref().unwrap_or_default().is_empty());
        assert!(result.error.unwrap().contains("file1.jpg"));
        assert_eq!(result.failed_index, Some(1));
        // first upload stays in storage, third never started
        assert_eq!(result.urls.len(), 1);
        assert_eq!(object_store.attempts(), 2);
    }

    #[test]
    fn given_empty_batch_when_upload_then_success_without_urls() {
        let store = TaggedAssetStore::new(Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap()));
        let result = store.upload_tagged_files(&[], &options("Exterior"));
        assert!(result.success);
        assert!(result.urls.is_empty());
    }

    #[test]
    fn given_uploaded_url_when_delete_then_object_removed() {
        let _ = init_test_env();
        let object_store = Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap());
        let store = TaggedAssetStore::new(object_store.clone());
        let uploaded = store.upload_tagged_files(&files(1), &options("Wedding Photos"));

        let result = store.delete_image_from_storage("b", &uploaded.urls[0]);

        assert!(result.success, "{:?}", result.error);
        assert!(object_store.paths("b").is_empty());
    }

    #[test]
    fn given_foreign_url_when_delete_then_failure_without_store_call() {
        let object_store = Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap());
        let store = TaggedAssetStore::new(object_store);

        let result = store.delete_image_from_storage("b", "https://elsewhere.org/x/y.jpg");

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[test]
    fn given_missing_object_when_delete_then_failure_result() {
        let store = TaggedAssetStore::new(Arc::new(InMemoryObjectStore::new("https://cdn.test").unwrap()));
        let result = store.delete_image_from_storage("b", "https://cdn.test/b/Exterior/1-x.jpg");
        assert!(!result.success);
        assert!(result.error.is_some());
    }

    #[test]
    fn given_base_path_named_like_bucket_when_delete_then_object_removed() {
        let _ = init_test_env();
        let object_store = Arc::new(InMemoryObjectStore::new("https://cdn.test/b").unwrap());
        let store = TaggedAssetStore::new(object_store.clone());
        let uploaded = store.upload_tagged_files(&files(1), &options("Exterior"));
        assert!(uploaded.urls[0].starts_with("https://cdn.test/b/b/Exterior/"));

        let result = store.delete_image_from_storage("b", &uploaded.urls[0]);

        assert!(result.success, "{:?}", result.error);
        assert!(object_store.paths("b").is_empty());
    }
}
