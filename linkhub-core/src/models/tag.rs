//! Tag names and tag-list normalization
//!
//! Tags are free text (not slugs) but must be printable: no control
//! characters, trimmed, at most 64 characters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for tag names
pub const MAX_TAG_NAME_LEN: usize = 64;

static CONTROL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Cc}]").expect("invalid control-char regex"));

/// Validated tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Create a tag name, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use linkhub_core::models::TagName;
    ///
    /// assert_eq!(TagName::new("  rust ").unwrap().as_str(), "rust");
    /// assert!(TagName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "tag name" });
        }

        if trimmed.chars().count() > MAX_TAG_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tag name",
                max: MAX_TAG_NAME_LEN,
            });
        }

        if CONTROL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "tag name",
                reason: "must not contain control characters",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the tag name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a user-supplied tag list.
///
/// Blank entries are skipped and repeats collapse to the first
/// occurrence, so `["a", " ", "a", "b"]` becomes `["a", "b"]`.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Result<Vec<TagName>, ValidationError> {
    let mut tags: Vec<TagName> = Vec::with_capacity(raw.len());
    for item in raw {
        if item.as_ref().trim().is_empty() {
            continue;
        }
        let tag = TagName::new(item.as_ref())?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// Collapse tag names gathered from joined rows into a sorted,
/// deduplicated list. Callers drop the outer join's NULLs; empty names
/// are dropped here.
pub fn flatten_tags<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut tags: Vec<String> = names.into_iter().filter(|n| !n.is_empty()).collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_names() {
        assert_eq!(TagName::new(" web ").unwrap().as_str(), "web");
    }

    #[test]
    fn allows_spaces_and_unicode() {
        assert!(TagName::new("side project").is_ok());
        assert!(TagName::new("café").is_ok());
    }

    #[test]
    fn rejects_control_characters() {
        let err = TagName::new("bad\ttag").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn max_length() {
        assert!(TagName::new(&"a".repeat(64)).is_ok());
        let err = TagName::new(&"a".repeat(65)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 64, .. }));
    }

    #[test]
    fn normalize_skips_blank_and_repeats() {
        let tags = normalize_tags(&["a", " ", "a", "b", " b "]).unwrap();
        let names: Vec<&str> = tags.iter().map(TagName::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn normalize_propagates_invalid_entries() {
        let long = "x".repeat(100);
        assert!(normalize_tags(&["ok", long.as_str()]).is_err());
    }

    #[test]
    fn flatten_sorts_and_dedups() {
        let flat = flatten_tags(vec![
            "b".to_string(),
            "a".to_string(),
            String::new(),
            "b".to_string(),
        ]);
        assert_eq!(flat, vec!["a", "b"]);
    }

    #[test]
    fn flatten_empty_is_empty() {
        assert!(flatten_tags(Vec::new()).is_empty());
    }
}
