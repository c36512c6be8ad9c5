//! Domain models with validation at construction
//!
//! User input is validated when building `NewLink`, `LinkPatch`, and
//! `ProfileInput`. Invalid input returns `ValidationError`, not a panic.

pub mod link;
pub mod profile;
pub mod tag;
pub mod validation;

pub use link::{Link, LinkPatch, NewLink};
pub use profile::{decode_social_links, ImageShape, Profile, ProfileDraft, ProfileInput, SocialLink};
pub use tag::{flatten_tags, normalize_tags, TagName};
pub use validation::ValidationError;
