// src/infrastructure/storage/fs_object_store.rs
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};
use url::Url;

use crate::domain::error::DomainResult;
use crate::domain::repositories::object_store::ObjectStore;
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};
use crate::infrastructure::storage::{parse_base_url, public_url_for, storage_path_for};

/// Object store backed by a directory tree: `root/<bucket>/<path>`.
///
/// Public URLs are built from `public_base_url`; serving the files is left to
/// whatever web server points at `root`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    base_url: Url,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> InfrastructureResult<Self> {
        let root = root.into();
        debug!("Creating FsObjectStore at {}", root.display());
        Ok(Self {
            root,
            base_url: parse_base_url(public_base_url)?,
        })
    }

    /// Location on disk, refusing anything that would escape the bucket directory
    fn object_path(&self, bucket: &str, path: &str) -> InfrastructureResult<PathBuf> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket == "." || bucket == ".." {
            return Err(InfrastructureError::Storage(format!(
                "Invalid bucket name: '{}'",
                bucket
            )));
        }

        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !is_plain {
            return Err(InfrastructureError::Storage(format!(
                "Invalid object path: '{}'",
                path
            )));
        }

        Ok(self.root.join(bucket).join(relative))
    }

    fn write_new(&self, target: &Path, data: &[u8]) -> InfrastructureResult<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                InfrastructureError::FileSystem(format!("creating {}: {}", parent.display(), e))
            })?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => InfrastructureError::Storage(format!(
                    "Object already exists: {}",
                    target.display()
                )),
                _ => InfrastructureError::FileSystem(format!("{}: {}", target.display(), e)),
            })?;

        file.write_all(data)
            .map_err(|e| InfrastructureError::FileSystem(format!("{}: {}", target.display(), e)))
    }
}

impl ObjectStore for FsObjectStore {
    #[instrument(skip(self, data), level = "debug", fields(bytes = data.len()))]
    fn upload(&self, bucket: &str, path: &str, data: &[u8]) -> DomainResult<()> {
        let target = self.object_path(bucket, path)?;
        self.write_new(&target, data)?;
        debug!("Wrote {}", target.display());
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, bucket: &str, path: &str) -> DomainResult<()> {
        let target = self.object_path(bucket, path)?;
        fs::remove_file(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                InfrastructureError::Storage(format!("Object not found: {}/{}", bucket, path))
            }
            _ => InfrastructureError::FileSystem(format!("{}: {}", target.display(), e)),
        })?;
        debug!("Removed {}", target.display());
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        public_url_for(&self.base_url, bucket, path)
    }

    fn storage_path(&self, bucket: &str, url: &str) -> DomainResult<String> {
        storage_path_for(&self.base_url, bucket, url)
    }
}
