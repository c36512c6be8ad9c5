//! linkhub-core: records, validation, and configuration shared by the
//! linkhub server and CLI.

pub mod config;
pub mod error;
pub mod models;

pub use config::{Backend, DatabaseTarget, LinkhubConfig};
pub use error::{ConfigError, ConfigResult};
pub use models::{
    ImageShape, Link, LinkPatch, NewLink, Profile, ProfileDraft, ProfileInput, SocialLink,
    TagName, ValidationError,
};
