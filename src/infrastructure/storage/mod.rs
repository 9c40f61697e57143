// src/infrastructure/storage/mod.rs
use percent_encoding::percent_decode_str;
use url::Url;

use crate::domain::error::{DomainError, DomainResult};
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};

pub mod fs_object_store;
pub mod memory_object_store;

pub use fs_object_store::FsObjectStore;
pub use memory_object_store::InMemoryObjectStore;

/// Parses the base URL objects are served from
pub fn parse_base_url(base_url: &str) -> InfrastructureResult<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| InfrastructureError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(InfrastructureError::InvalidUrl(format!(
            "{} cannot be used as a base URL",
            base_url
        )));
    }
    Ok(url)
}

/// `{base}/{bucket}/{path}` with every segment percent-encoded
pub fn public_url_for(base: &Url, bucket: &str, path: &str) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .push(bucket)
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    url.to_string()
}

fn non_empty_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Inverse of [`public_url_for`]: the bucket segment must follow the base path directly.
pub fn storage_path_for(base: &Url, bucket: &str, url: &str) -> DomainResult<String> {
    let parsed = Url::parse(url)
        .map_err(|e| DomainError::Delete(format!("Invalid image URL '{}': {}", url, e)))?;
    if parsed.origin() != base.origin() {
        return Err(DomainError::Delete(format!(
            "Bucket '{}' not found in URL '{}': not served from {}",
            bucket, url, base
        )));
    }

    let base_segments = non_empty_segments(base);
    let segments = non_empty_segments(&parsed);
    let under_bucket = segments
        .strip_prefix(base_segments.as_slice())
        .and_then(|rest| rest.split_first())
        .filter(|(first, _)| first.as_str() == bucket)
        .map(|(_, path)| path)
        .ok_or_else(|| {
            DomainError::Delete(format!(
                "Bucket '{}' not found under {} in URL '{}'",
                bucket, base, url
            ))
        })?;

    if under_bucket.is_empty() {
        return Err(DomainError::Delete(format!(
            "URL '{}' has no object path after bucket '{}'",
            url, bucket
        )));
    }
    Ok(under_bucket.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upload::extract_storage_path;

    #[test]
    fn given_base_path_containing_bucket_name_when_storage_path_then_uses_segment_after_base() {
        let base = parse_base_url("https://cdn.example.com/portfolio/v1").unwrap();
        let url = public_url_for(&base, "portfolio", "Exterior/1-a.jpg");
        assert_eq!(url, "https://cdn.example.com/portfolio/v1/portfolio/Exterior/1-a.jpg");

        assert_eq!(
            storage_path_for(&base, "portfolio", &url).unwrap(),
            "Exterior/1-a.jpg"
        );
    }

    #[test]
    fn given_tag_named_like_bucket_when_storage_path_then_tag_kept_in_path() {
        let base = parse_base_url("https://cdn.example.com").unwrap();
        let url = public_url_for(&base, "b", "b/1-a.jpg");
        assert_eq!(storage_path_for(&base, "b", &url).unwrap(), "b/1-a.jpg");
    }

    #[test]
    fn given_foreign_or_incomplete_url_when_storage_path_then_delete_error() {
        let base = parse_base_url("https://cdn.example.com/files").unwrap();
        for url in [
            "https://elsewhere.org/files/b/x.jpg",
            "https://cdn.example.com/other/b/x.jpg",
            "https://cdn.example.com/files/b",
            "not a url",
        ] {
            assert!(
                matches!(storage_path_for(&base, "b", url), Err(DomainError::Delete(_))),
                "{}",
                url
            );
        }
    }

    #[test]
    fn given_base_without_path_when_public_url_then_joins_bucket_and_path() {
        let base = parse_base_url("https://cdn.example.com").unwrap();
        assert_eq!(
            public_url_for(&base, "portfolio", "v1/Exterior/1-a.jpg"),
            "https://cdn.example.com/portfolio/v1/Exterior/1-a.jpg"
        );
    }

    #[test]
    fn given_base_with_trailing_slash_when_public_url_then_no_double_slash() {
        let base = parse_base_url("https://cdn.example.com/storage/v1/public/").unwrap();
        assert_eq!(
            public_url_for(&base, "b", "t/x.png"),
            "https://cdn.example.com/storage/v1/public/b/t/x.png"
        );
    }

    #[test]
    fn given_tag_with_space_when_public_url_then_path_is_recoverable() {
        let base = parse_base_url("https://cdn.example.com").unwrap();
        let url = public_url_for(&base, "b", "Wedding Photos/1-x.png");
        assert!(url.contains("Wedding%20Photos"));
        assert_eq!(extract_storage_path("b", &url).unwrap(), "Wedding Photos/1-x.png");
    }

    #[test]
    fn given_invalid_base_when_parse_then_error() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }
}
