//! Link repository on PostgreSQL
//!
//! - create/update: link row, tag upserts, and associations in one transaction
//! - get/list: single LEFT JOIN query with `array_agg` for tags

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkhub_core::models::{flatten_tags, TagName};
use linkhub_core::{Link, LinkPatch, NewLink};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

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
        array_agg(t.name) AS tags
    FROM links l
    LEFT JOIN link_tags lt ON lt.link_id = l.id
    LEFT JOIN tags t ON t.id = lt.tag_id
"#;

/// Link row with tags aggregated by the outer join (NULL when untagged)
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
    tags: Vec<Option<String>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            share_count: row.share_count,
            is_active: row.is_active,
            tags: flatten_tags(row.tags.into_iter().flatten()),
        }
    }
}

/// Link repository
pub struct PgLinkRepo {
    pool: PgPool,
}

impl PgLinkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Upsert each tag and associate it with the link.
async fn attach_tags(
    tx: &mut Transaction<'_, Postgres>,
    link_id: i64,
    tags: &[TagName],
) -> Result<(), DbError> {
    for tag in tags {
        // DO UPDATE (not DO NOTHING) so RETURNING yields the existing id
        let (tag_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tags (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(tag.as_str())
        .fetch_one(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO link_tags (link_id, tag_id) VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(link_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl LinkRepository for PgLinkRepo {
    #[instrument(level = "debug", skip(self, link), fields(url = %link.url()), err)]
    async fn create(&self, link: &NewLink) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO links (url, title, description)
            VALUES ($1, $2, $3)
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
        let sql = format!("{LINK_SELECT} WHERE l.id = $1 GROUP BY l.id");
        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Link::from))
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Link>, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(LINK_SELECT);

        // EXISTS keeps every tag of a matching link in the aggregate
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
        Ok(rows.into_iter().map(Link::from).collect())
    }

    #[instrument(level = "debug", skip(self, patch), err)]
    async fn update(&self, id: i64, patch: &LinkPatch) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE links SET updated_at = NOW()");
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
            // Nothing to re-tag; dropping the transaction rolls it back
            return Ok(false);
        }

        if let Some(tags) = patch.tags() {
            sqlx::query("DELETE FROM link_tags WHERE link_id = $1")
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
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn increment_share_count(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("UPDATE links SET share_count = share_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
