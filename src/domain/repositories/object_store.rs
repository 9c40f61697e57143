// src/domain/repositories/object_store.rs
use crate::domain::error::DomainResult;
use crate::domain::upload::extract_storage_path;

/*
   Object storage interface
   Assets live in buckets and are addressed by a bucket-relative path.
   The public URL of an asset is its only identity in the rest of the system,
   so public_url must be deterministic and free of I/O.
*/
/// Bucket-based blob storage the tagged asset store uploads to and deletes from
pub trait ObjectStore: std::fmt::Debug + Send + Sync {
    /// Store `data` at `path`. Fails if an object already exists there.
    fn upload(&self, bucket: &str, path: &str, data: &[u8]) -> DomainResult<()>;

    /// Delete the object at `path`
    fn delete(&self, bucket: &str, path: &str) -> DomainResult<()>;

    /// Stable URL under which `path` is publicly fetchable
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Bucket-relative path behind a URL produced by `public_url`
    fn storage_path(&self, bucket: &str, url: &str) -> DomainResult<String> {
        extract_storage_path(bucket, url)
    }
}
