// src/domain/tag.rs
use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Maximum number of characters allowed in a tag name
pub const MAX_TAG_LENGTH: usize = 50;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_'
}

/// True iff the tag is 1..=50 characters of letters, digits, space, hyphen or underscore.
pub fn validate_tag_name(tag: &str) -> bool {
    let len = tag.chars().count();
    (1..=MAX_TAG_LENGTH).contains(&len) && tag.chars().all(is_allowed_char)
}

/// Trims the tag and collapses internal whitespace runs to a single space.
pub fn format_tag_name(tag: &str) -> String {
    tag.split_whitespace().join(" ")
}

/// A formatted and validated tag name, usable as a key of a tagged asset map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    value: String,
}

impl Tag {
    /// Formats the raw input, then validates it
    pub fn new<S: AsRef<str>>(value: S) -> DomainResult<Self> {
        let value = format_tag_name(value.as_ref());

        if value.is_empty() {
            return Err(DomainError::InvalidTag("Tag cannot be empty".to_string()));
        }

        if value.chars().count() > MAX_TAG_LENGTH {
            return Err(DomainError::InvalidTag(format!(
                "Tag cannot be longer than {} characters",
                MAX_TAG_LENGTH
            )));
        }

        if !validate_tag_name(&value) {
            return Err(DomainError::InvalidTag(format!(
                "'{}' may only contain letters, numbers, spaces, hyphens and underscores",
                value
            )));
        }

        Ok(Self { value })
    }

    /// Get the tag value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Wedding Photos")]
    #[case("decor-2024")]
    #[case("d_1")]
    #[case("a")]
    fn given_valid_tag_when_validate_then_accepts(#[case] tag: &str) {
        assert!(validate_tag_name(tag));
    }

    #[rstest]
    #[case("")]
    #[case("user@example")]
    #[case("a/b")]
    #[case("file.jpg")]
    #[case("Café")]
    fn given_invalid_tag_when_validate_then_rejects(#[case] tag: &str) {
        assert!(!validate_tag_name(tag));
    }

    #[test]
    fn given_length_boundary_when_validate_then_fifty_is_the_limit() {
        assert!(validate_tag_name(&"x".repeat(50)));
        assert!(!validate_tag_name(&"x".repeat(51)));
    }

    #[test]
    fn given_messy_whitespace_when_format_then_trims_and_collapses() {
        assert_eq!(format_tag_name("  Wedding   Photos  "), "Wedding Photos");
        assert_eq!(format_tag_name("Exterior\t\tShots"), "Exterior Shots");
        assert_eq!(format_tag_name("   "), "");
    }

    #[test]
    fn given_raw_input_when_create_tag_then_formats_before_validating() {
        let tag = Tag::new("  Wedding   Photos ").unwrap();
        assert_eq!(tag.value(), "Wedding Photos");
        assert_eq!(tag, Tag::new("Wedding Photos").unwrap());
    }

    #[test]
    fn given_invalid_input_when_create_tag_then_returns_invalid_tag_error() {
        assert!(matches!(Tag::new("   "), Err(DomainError::InvalidTag(_))));
        assert!(matches!(Tag::new("a.b"), Err(DomainError::InvalidTag(_))));
        assert!(matches!(
            Tag::new("y".repeat(51)),
            Err(DomainError::InvalidTag(_))
        ));
    }
}
