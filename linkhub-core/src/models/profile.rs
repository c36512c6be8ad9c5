//! The single editable profile
//!
//! Wire format is camelCase (`imageShape`, `socialLinks`) to match what
//! the landing page already consumes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::validation::{optional_text, required_text};
use super::ValidationError;

const MAX_NAME_LEN: usize = 128;
const MAX_SHORT_TEXT_LEN: usize = 256;
const MAX_BIO_LEN: usize = 4096;

/// How the avatar is cropped on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageShape {
    Circle,
    Square,
    Portrait,
}

impl ImageShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Portrait => "portrait",
        }
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageShape {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "portrait" => Ok(Self::Portrait),
            other => Err(ValidationError::InvalidVariant {
                field: "image shape",
                value: other.to_owned(),
            }),
        }
    }
}

/// One entry of the profile's ordered social links list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
}

/// Profile as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub image_shape: Option<ImageShape>,
    pub image_position: Option<i32>,
    pub social_links: Vec<SocialLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated profile as submitted by a client or read from a file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub image_shape: Option<ImageShape>,
    pub image_position: Option<i32>,
    pub social_links: Vec<SocialLink>,
}

/// Validated profile ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    name: String,
    role: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
    image_shape: Option<ImageShape>,
    image_position: Option<i32>,
    social_links: Vec<SocialLink>,
}

impl TryFrom<ProfileDraft> for ProfileInput {
    type Error = ValidationError;

    fn try_from(draft: ProfileDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required_text("name", &draft.name, MAX_NAME_LEN)?,
            role: optional_text("role", draft.role.as_deref(), MAX_SHORT_TEXT_LEN)?,
            bio: optional_text("bio", draft.bio.as_deref(), MAX_BIO_LEN)?,
            email: optional_text("email", draft.email.as_deref(), MAX_SHORT_TEXT_LEN)?,
            phone: optional_text("phone", draft.phone.as_deref(), MAX_SHORT_TEXT_LEN)?,
            // data: URLs for inline avatars can be large, so no limit here
            avatar: optional_text("avatar", draft.avatar.as_deref(), usize::MAX)?,
            image_shape: draft.image_shape,
            image_position: draft.image_position,
            social_links: draft.social_links,
        })
    }
}

impl ProfileInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn image_shape(&self) -> Option<ImageShape> {
        self.image_shape
    }

    pub fn image_position(&self) -> Option<i32> {
        self.image_position
    }

    pub fn social_links(&self) -> &[SocialLink] {
        &self.social_links
    }

    /// Serialize the social links for the `social_links` column.
    pub fn social_links_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.social_links)
    }
}

/// Decode the stored `social_links` column.
///
/// Accepts a JSON array, a JSON string holding an encoded array (older
/// rows were written that way), or NULL, which reads as no links.
pub fn decode_social_links(value: Option<JsonValue>) -> Result<Vec<SocialLink>, serde_json::Error> {
    match value {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::String(encoded)) => {
            if encoded.trim().is_empty() {
                Ok(Vec::new())
            } else {
                serde_json::from_str(&encoded)
            }
        }
        Some(other) => serde_json::from_value(other),
    }
}
