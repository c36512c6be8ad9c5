//! Profile repository on PostgreSQL
//!
//! `save` replaces the table contents inside a transaction, which is what
//! keeps the table at zero or one row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkhub_core::models::decode_social_links;
use linkhub_core::{ImageShape, Profile, ProfileInput};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use crate::db::repos::{DbError, ProfileRepository};

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    role: Option<String>,
    bio: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
    image_shape: Option<String>,
    image_position: Option<i32>,
    social_links: Option<JsonValue>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DbError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let image_shape = row
            .image_shape
            .as_deref()
            .map(str::parse::<ImageShape>)
            .transpose()
            .map_err(|e| DbError::Corrupt {
                column: "image_shape",
                reason: e.to_string(),
            })?;

        let social_links =
            decode_social_links(row.social_links).map_err(|e| DbError::Corrupt {
                column: "social_links",
                reason: e.to_string(),
            })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            role: row.role,
            bio: row.bio,
            email: row.email,
            phone: row.phone,
            avatar: row.avatar,
            image_shape,
            image_position: row.image_position,
            social_links,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Profile repository
pub struct PgProfileRepo {
    pool: PgPool,
}

impl PgProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepo {
    #[instrument(level = "debug", skip(self), err)]
    async fn get(&self) -> Result<Option<Profile>, DbError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, name, role, bio, email, phone, avatar,
                   image_shape, image_position, social_links,
                   created_at, updated_at
            FROM profiles
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(Profile::try_from).transpose()
    }

    #[instrument(level = "debug", skip(self, profile), fields(name = %profile.name()), err)]
    async fn save(&self, profile: &ProfileInput) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM profiles").execute(&mut *tx).await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (
                name, role, bio, email, phone, avatar,
                image_shape, image_position, social_links
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(profile.name())
        .bind(profile.role())
        .bind(profile.bio())
        .bind(profile.email())
        .bind(profile.phone())
        .bind(profile.avatar())
        .bind(profile.image_shape().map(|s| s.as_str()))
        .bind(profile.image_position())
        .bind(Json(profile.social_links()))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
