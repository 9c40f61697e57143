// src/infrastructure/storage/memory_object_store.rs
use std::sync::Mutex;

use tracing::{instrument, trace};
use url::Url;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::object_store::ObjectStore;
use crate::infrastructure::error::InfrastructureResult;
use crate::infrastructure::storage::{parse_base_url, public_url_for, storage_path_for};

/// Object store that keeps everything in memory, for tests and dry runs
#[derive(Debug)]
pub struct InMemoryObjectStore {
    base_url: Url,
    objects: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: &str) -> InfrastructureResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            objects: Mutex::new(Vec::new()),
        })
    }

    /// Paths stored in `bucket`, in upload order
    pub fn paths(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .map(|objects| {
                objects
                    .iter()
                    .filter(|(b, _, _)| b == bucket)
                    .map(|(_, path, _)| path.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        let objects = self.objects.lock().ok()?;
        objects
            .iter()
            .find(|(b, p, _)| b == bucket && p == path)
            .map(|(_, _, data)| data.clone())
    }
}

impl ObjectStore for InMemoryObjectStore {
    #[instrument(skip(self, data), level = "trace")]
    fn upload(&self, bucket: &str, path: &str, data: &[u8]) -> DomainResult<()> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| DomainError::Storage(format!("object store lock poisoned: {}", e)))?;
        if objects.iter().any(|(b, p, _)| b == bucket && p == path) {
            return Err(DomainError::Storage(format!(
                "Object already exists: {}/{}",
                bucket, path
            )));
        }
        trace!("Storing {} bytes at {}/{}", data.len(), bucket, path);
        objects.push((bucket.to_string(), path.to_string(), data.to_vec()));
        Ok(())
    }

    #[instrument(skip(self), level = "trace")]
    fn delete(&self, bucket: &str, path: &str) -> DomainResult<()> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|e| DomainError::Storage(format!("object store lock poisoned: {}", e)))?;
        let position = objects
            .iter()
            .position(|(b, p, _)| b == bucket && p == path)
            .ok_or_else(|| DomainError::Storage(format!("Object not found: {}/{}", bucket, path)))?;
        objects.remove(position);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_url_for(&self.base_url, bucket, path)
    }

    fn storage_path(&self, bucket: &str, url: &str) -> DomainResult<String> {
        storage_path_for(&self.base_url, bucket, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_existing_object_when_upload_again_then_fails() {
        let store = InMemoryObjectStore::new("https://cdn.test").unwrap();
        store.upload("b", "t/1.jpg", b"one").unwrap();
        assert!(store.upload("b", "t/1.jpg", b"two").is_err());
        assert_eq!(store.get("b", "t/1.jpg").unwrap(), b"one".to_vec());
    }

    #[test]
    fn given_objects_in_two_buckets_when_delete_then_only_target_removed() {
        let store = InMemoryObjectStore::new("https://cdn.test").unwrap();
        store.upload("a", "x", b"1").unwrap();
        store.upload("b", "x", b"2").unwrap();
        store.delete("a", "x").unwrap();
        assert!(store.paths("a").is_empty());
        assert_eq!(store.paths("b"), vec!["x"]);
        assert_eq!(store.paths("b").len(), 1);
        assert!(store.delete("a", "x").is_err());
    }
}
