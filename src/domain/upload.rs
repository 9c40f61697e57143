// src/domain/upload.rs
use std::fs;
use std::path::Path;

use chrono::Utc;
use derive_builder::Builder;
use percent_encoding::percent_decode_str;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use url::Url;

use crate::domain::error::{DomainError, DomainResult};

const FALLBACK_EXTENSION: &str = "bin";
const SUFFIX_LEN: usize = 10;

/// A local file waiting to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl AssetFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn from_path(path: &Path) -> DomainResult<Self> {
        let data = fs::read(path)
            .map_err(|e| DomainError::Io(e).context(format!("reading {}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, data })
    }

    /// Lowercased extension of the file name, `bin` when there is none
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
    }
}

/// Where an upload batch goes
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct UploadOptions {
    pub bucket: String,
    #[builder(default, setter(into, strip_option))]
    pub folder: Option<String>,
    pub tag: String,
}

/// Outcome of a batch upload.
///
/// On failure `urls` holds whatever was uploaded before the failing file.
/// Those objects stay in storage and must not be merged into a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub success: bool,
    pub urls: Vec<String>,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Zero-based index of the file that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_index: Option<usize>,
}

impl UploadResult {
    pub fn succeeded(urls: Vec<String>, tag: impl Into<String>) -> Self {
        Self {
            success: true,
            urls,
            tag: tag.into(),
            error: None,
            failed_index: None,
        }
    }

    pub fn failed(
        urls: Vec<String>,
        tag: impl Into<String>,
        failed_index: usize,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            urls,
            tag: tag.into(),
            error: Some(error.into()),
            failed_index: Some(failed_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeleteResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// `[folder/]tag/<timestamp>-<random>.<ext>` for a file about to be uploaded
pub fn generate_storage_path(folder: Option<&str>, tag: &str, file: &AssetFile) -> String {
    compose_storage_path(
        folder,
        tag,
        Utc::now().timestamp_millis(),
        &random_suffix(),
        &file.extension(),
    )
}

pub fn compose_storage_path(
    folder: Option<&str>,
    tag: &str,
    timestamp_millis: i64,
    suffix: &str,
    extension: &str,
) -> String {
    let file_name = format!("{}-{}.{}", timestamp_millis, suffix, extension);
    match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{}/{}/{}", folder, tag, file_name),
        None => format!("{}/{}", tag, file_name),
    }
}

/// Bucket-relative storage path of a public URL: everything after the bucket segment.
pub fn extract_storage_path(bucket: &str, url: &str) -> DomainResult<String> {
    let parsed = Url::parse(url)
        .map_err(|e| DomainError::Delete(format!("Invalid image URL '{}': {}", url, e)))?;
    let segments: Vec<String> = parsed
        .path_segments()
        .ok_or_else(|| DomainError::Delete(format!("Image URL '{}' has no path", url)))?
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();

    let bucket_index = segments
        .iter()
        .position(|segment| segment == bucket)
        .ok_or_else(|| {
            DomainError::Delete(format!("Bucket '{}' not found in URL '{}'", bucket, url))
        })?;

    let path = segments[bucket_index + 1..].join("/");
    if path.is_empty() {
        return Err(DomainError::Delete(format!(
            "URL '{}' has no object path after bucket '{}'",
            url, bucket
        )));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_file_names_when_extension_then_lowercased_with_fallback() {
        assert_eq!(AssetFile::new("Photo.JPG", vec![]).extension(), "jpg");
        assert_eq!(AssetFile::new("archive.tar.gz", vec![]).extension(), "gz");
        assert_eq!(AssetFile::new("README", vec![]).extension(), "bin");
        assert_eq!(AssetFile::new("weird.j p", vec![]).extension(), "bin");
    }

    #[test]
    fn given_folder_when_compose_path_then_prefixes_folder() {
        assert_eq!(
            compose_storage_path(Some("vendor-7/"), "Exterior", 1700000000000, "abc", "png"),
            "vendor-7/Exterior/1700000000000-abc.png"
        );
        assert_eq!(
            compose_storage_path(None, "Exterior", 1, "x", "jpg"),
            "Exterior/1-x.jpg"
        );
        assert_eq!(compose_storage_path(Some("/"), "t", 1, "x", "jpg"), "t/1-x.jpg");
    }

    #[test]
    fn given_two_files_when_generate_paths_then_paths_differ() {
        let file = AssetFile::new("a.jpg", vec![1]);
        let first = generate_storage_path(None, "Exterior", &file);
        let second = generate_storage_path(None, "Exterior", &file);
        assert_ne!(first, second);
        assert!(first.starts_with("Exterior/"));
        assert!(first.ends_with(".jpg"));
    }

    #[test]
    fn given_public_url_when_extract_then_returns_path_after_bucket() {
        let url = "https://cdn.example.com/storage/v1/object/public/portfolio/v1/Exterior/1-a.jpg";
        assert_eq!(
            extract_storage_path("portfolio", url).unwrap(),
            "v1/Exterior/1-a.jpg"
        );
    }

    #[test]
    fn given_encoded_segments_when_extract_then_decodes() {
        let url = "https://cdn.example.com/portfolio/Wedding%20Photos/1-a.jpg";
        assert_eq!(
            extract_storage_path("portfolio", url).unwrap(),
            "Wedding Photos/1-a.jpg"
        );
    }

    #[test]
    fn given_foreign_or_malformed_url_when_extract_then_delete_error() {
        assert!(matches!(
            extract_storage_path("portfolio", "https://elsewhere.com/other/a.jpg"),
            Err(DomainError::Delete(_))
        ));
        assert!(matches!(
            extract_storage_path("portfolio", "not a url"),
            Err(DomainError::Delete(_))
        ));
        assert!(matches!(
            extract_storage_path("portfolio", "https://cdn.example.com/portfolio/"),
            Err(DomainError::Delete(_))
        ));
    }

    #[test]
    fn given_builder_without_folder_when_build_then_folder_is_none() {
        let options = UploadOptionsBuilder::default()
            .bucket("b")
            .tag("Exterior")
            .build()
            .unwrap();
        assert_eq!(options.folder, None);
        let options = UploadOptionsBuilder::default()
            .bucket("b")
            .folder("v1")
            .tag("Exterior")
            .build()
            .unwrap();
        assert_eq!(options.folder.as_deref(), Some("v1"));
    }
}
