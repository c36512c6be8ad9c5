//! Link repository on SQLite
//!
//! Tags are gathered with `json_group_array` so names containing commas
//! survive the trip; the outer join contributes a `null` for untagged
//! links, which [`flatten_tags`] drops.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkhub_core::models::{flatten_tags, TagName};
use linkhub_core::{Link, LinkPatch, NewLink};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::instrument;

use super::SQLITE_NOW;
use crate::db::repos::{DbError, LinkRepository};

const LINK_SELECT: &str = r#"
    SELECT
        l.id,
        l.url,
        l.title,
        l.description,
        l.created_at,
        l.updated_at,
        l.share_count,
        l.is_active,
        json_group_array(t.name) AS tags
    FROM links l
    LEFT JOIN link_tags lt ON lt.link_id = l.id
    LEFT JOIN tags t ON t.id = lt.tag_id
"#;

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    url: String,
    title: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    share_count: i64,
    is_active: bool,
    tags: String,
}

impl TryFrom<LinkRow> for Link {
    type Error = DbError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let names: Vec<Option<String>> =
            serde_json::from_str(&row.tags).map_err(|e| DbError::Corrupt {
                column: "tags",
                reason: e.to_string(),
            })?;

        Ok(Self {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            share_count: row.share_count,
            is_active: row.is_active,
            tags: flatten_tags(names.into_iter().flatten()),
        })
    }
}

/// Link repository
pub struct SqliteLinkRepo {
    pool: SqlitePool,
}

impl SqliteLinkRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Upsert each tag and associate it with the link.
async fn attach_tags(
    tx: &mut Transaction<'_, Sqlite>,
    link_id: i64,
    tags: &[TagName],
) -> Result<(), DbError> {
    for tag in tags {
        let (tag_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tags (name) VALUES (?)
            ON CONFLICT (name) DO UPDATE SET name = excluded.name
            RETURNING id
            "#,
        )
        .bind(tag.as_str())
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query("INSERT OR IGNORE INTO link_tags (link_id, tag_id) VALUES (?, ?)")
            .bind(link_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl LinkRepository for SqliteLinkRepo {
    #[instrument(level = "debug", skip(self, link), fields(url = %link.url()), err)]
    async fn create(&self, link: &NewLink) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO links (url, title, description)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(link.url())
        .bind(link.title())
        .bind(link.description())
        .fetch_one(&mut *tx)
        .await?;

        attach_tags(&mut tx, id, link.tags()).await?;

        tx.commit().await?;
        Ok(id)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn get(&self, id: i64) -> Result<Option<Link>, DbError> {
        let sql = format!("{LINK_SELECT} WHERE l.id = ? GROUP BY l.id");
        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Link::try_from).transpose()
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Link>, DbError> {
        let mut query = QueryBuilder::<Sqlite>::new(LINK_SELECT);

        if let Some(tag) = tag {
            query
                .push(
                    " WHERE EXISTS (SELECT 1 FROM link_tags lt2 \
                     JOIN tags t2 ON t2.id = lt2.tag_id \
                     WHERE lt2.link_id = l.id AND t2.name = ",
                )
                .push_bind(tag)
                .push(")");
        }
        query.push(" GROUP BY l.id ORDER BY l.created_at DESC, l.id DESC");

        let rows: Vec<LinkRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Link::try_from).collect()
    }

    #[instrument(level = "debug", skip(self, patch), err)]
    async fn update(&self, id: i64, patch: &LinkPatch) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE links SET updated_at = ");
        query.push(SQLITE_NOW);
        if let Some(url) = patch.url() {
            query.push(", url = ").push_bind(url);
        }
        if let Some(title) = patch.title() {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = patch.description() {
            query.push(", description = ").push_bind(description);
        }
        query.push(" WHERE id = ").push_bind(id);

        let affected = query.build().execute(&mut *tx).await?.rows_affected();
        if affected == 0 {
            return Ok(false);
        }

        if let Some(tags) = patch.tags() {
            sqlx::query("DELETE FROM link_tags WHERE link_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            attach_tags(&mut tx, id, tags).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn increment_share_count(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE links SET share_count = share_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
