//! Link records, creation input, and partial updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tag::{normalize_tags, TagName};
use super::validation::{optional_text, required_text};
use super::ValidationError;

/// Maximum URL length accepted on create/update
pub const MAX_URL_LEN: usize = 2048;

/// Maximum title length
pub const MAX_TITLE_LEN: usize = 256;

/// Maximum description length
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Link as read back from storage, with its flattened tag list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub share_count: i64,
    pub is_active: bool,
    pub tags: Vec<String>,
}

/// Validated input for creating a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    url: String,
    title: Option<String>,
    description: Option<String>,
    tags: Vec<TagName>,
}

impl NewLink {
    /// Validate and build a new link.
    ///
    /// # Rules
    /// - `url` is required (trimmed, at most 2048 characters)
    /// - blank `title`/`description` are stored as NULL
    /// - tags go through [`normalize_tags`]
    pub fn new<S: AsRef<str>>(
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        tags: &[S],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            url: required_text("url", url, MAX_URL_LEN)?,
            title: optional_text("title", title, MAX_TITLE_LEN)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LEN)?,
            tags: normalize_tags(tags)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[TagName] {
        &self.tags
    }
}

/// Partial update for a link.
///
/// Absent fields are left untouched. `title` and `description` are
/// doubly optional: `Some(None)` clears the column. A present `tags` list
/// replaces every association, including when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    url: Option<String>,
    title: Option<Option<String>>,
    description: Option<Option<String>>,
    tags: Option<Vec<TagName>>,
}

impl LinkPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: &str) -> Result<Self, ValidationError> {
        self.url = Some(required_text("url", url, MAX_URL_LEN)?);
        Ok(self)
    }

    pub fn with_title(mut self, title: Option<&str>) -> Result<Self, ValidationError> {
        self.title = Some(optional_text("title", title, MAX_TITLE_LEN)?);
        Ok(self)
    }

    pub fn with_description(mut self, description: Option<&str>) -> Result<Self, ValidationError> {
        self.description = Some(optional_text(
            "description",
            description,
            MAX_DESCRIPTION_LEN,
        )?);
        Ok(self)
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Result<Self, ValidationError> {
        self.tags = Some(normalize_tags(tags)?);
        Ok(self)
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<Option<&str>> {
        self.title.as_ref().map(Option::as_deref)
    }

    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    pub fn tags(&self) -> Option<&[TagName]> {
        self.tags.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_link_requires_url() {
        let err = NewLink::new::<&str>("  ", None, None, &[]).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "url" });
    }

    #[test]
    fn new_link_blank_title_is_none() {
        let link = NewLink::new::<&str>("https://example.com", Some(" "), None, &[]).unwrap();
        assert_eq!(link.title(), None);
        assert_eq!(link.url(), "https://example.com");
    }

    #[test]
    fn new_link_normalizes_tags() {
        let link = NewLink::new("https://example.com", None, None, &["rust", "rust", " web "])
            .unwrap();
        let tags: Vec<&str> = link.tags().iter().map(TagName::as_str).collect();
        assert_eq!(tags, vec!["rust", "web"]);
    }

    #[test]
    fn new_link_rejects_long_url() {
        let url = format!("https://{}", "a".repeat(MAX_URL_LEN));
        let err = NewLink::new::<&str>(&url, None, None, &[]).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "url", .. }));
    }

    #[test]
    fn empty_tag_list_replaces_tags() {
        let patch = LinkPatch::new().with_tags::<&str>(&[]).unwrap();
        assert_eq!(patch.tags(), Some(&[][..]));
        assert_eq!(patch.url(), None);
    }

    #[test]
    fn patch_can_clear_title() {
        let patch = LinkPatch::new().with_title(None).unwrap();
        assert_eq!(patch.title(), Some(None));
        assert_eq!(patch.description(), None);
    }

    #[test]
    fn patch_rejects_blank_url() {
        assert!(LinkPatch::new().with_url("").is_err());
    }

    #[test]
    fn patch_with_empty_tags_is_present() {
        let patch = LinkPatch::new().with_tags::<&str>(&[]).unwrap();
        assert_eq!(patch.tags(), Some(&[][..]));
    }
}
