//! Stand-in repository used when the database could not be configured
//! or opened. The server still starts; data calls fail with 503.

use async_trait::async_trait;
use linkhub_core::{Link, LinkPatch, NewLink, Profile, ProfileInput};

use super::{DbError, LinkRepository, ProfileRepository};

#[derive(Debug, Clone)]
pub struct UnavailableRepo {
    reason: String,
}

impl UnavailableRepo {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> DbError {
        DbError::Unavailable {
            reason: self.reason.clone(),
        }
    }
}

#[async_trait]
impl LinkRepository for UnavailableRepo {
    async fn create(&self, _link: &NewLink) -> Result<i64, DbError> {
        Err(self.err())
    }

    async fn get(&self, _id: i64) -> Result<Option<Link>, DbError> {
        Err(self.err())
    }

    async fn list(&self, _tag: Option<&str>) -> Result<Vec<Link>, DbError> {
        Err(self.err())
    }

    async fn update(&self, _id: i64, _patch: &LinkPatch) -> Result<bool, DbError> {
        Err(self.err())
    }

    async fn delete(&self, _id: i64) -> Result<bool, DbError> {
        Err(self.err())
    }

    async fn increment_share_count(&self, _id: i64) -> Result<bool, DbError> {
        Err(self.err())
    }
}

#[async_trait]
impl ProfileRepository for UnavailableRepo {
    async fn get(&self) -> Result<Option<Profile>, DbError> {
        Err(self.err())
    }

    async fn save(&self, _profile: &ProfileInput) -> Result<bool, DbError> {
        Err(self.err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_reports_reason() {
        let repo = UnavailableRepo::new("DATABASE_URL is not set");

        let err = LinkRepository::get(&repo, 1).await.unwrap_err();
        assert!(matches!(&err, DbError::Unavailable { reason } if reason == "DATABASE_URL is not set"));

        let err = ProfileRepository::get(&repo).await.unwrap_err();
        assert!(err.to_string().contains("database unavailable"));
    }
}
