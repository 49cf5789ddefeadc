use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::common::ContentError;
use crate::models::{ContentItem, ContentVersion, ContentVersionMeta};

use super::lock_content;

/// Appends a snapshot of the item's current fields. History is append-only;
/// revs are monotonic per item and assigned under the item's row lock.
pub async fn record_version(
    pool: &PgPool,
    content_item_id: Uuid,
    change_description: Option<&str>,
    actor_user_id: Option<Uuid>,
) -> Result<ContentVersion, ContentError> {
    let mut tx = pool.begin().await?;

    let item = lock_content(&mut tx, content_item_id)
        .await?
        .ok_or(ContentError::NotFound(content_item_id))?;

    let next = max_rev(&mut tx, content_item_id).await? + 1;
    let version =
        insert_snapshot(&mut tx, &item, next, change_description, actor_user_id).await?;

    tx.commit().await?;
    Ok(version)
}

pub async fn list_versions(
    pool: &PgPool,
    content_item_id: Uuid,
    limit: i64,
) -> Result<Vec<ContentVersionMeta>, sqlx::Error> {
    sqlx::query_as::<_, ContentVersionMeta>(
        r#"
        SELECT
            id,
            rev,
            title,
            status,
            change_description,
            created_by_user_id,
            created_at
        FROM content_versions
        WHERE content_item_id = $1
        ORDER BY rev DESC
        LIMIT $2
        "#,
    )
    .bind(content_item_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn get_version(
    pool: &PgPool,
    content_item_id: Uuid,
    version_id: Uuid,
) -> Result<Option<ContentVersion>, sqlx::Error> {
    sqlx::query_as::<_, ContentVersion>(
        r#"
        SELECT *
        FROM content_versions
        WHERE content_item_id = $1 AND id = $2
        "#,
    )
    .bind(content_item_id)
    .bind(version_id)
    .fetch_optional(pool)
    .await
}

/// Overwrites the item's editable fields with a snapshot. Status is left
/// alone: restoring an old body on a published item is a content
/// correction, not an unpublish. The restore itself lands in history as a
/// fresh version, so nothing is ever lost.
pub async fn restore_version(
    pool: &PgPool,
    content_item_id: Uuid,
    version_id: Uuid,
    actor_user_id: Option<Uuid>,
) -> Result<ContentItem, ContentError> {
    let mut tx = pool.begin().await?;

    lock_content(&mut tx, content_item_id)
        .await?
        .ok_or(ContentError::NotFound(content_item_id))?;

    let version = sqlx::query_as::<_, ContentVersion>(
        r#"
        SELECT *
        FROM content_versions
        WHERE content_item_id = $1 AND id = $2
        "#,
    )
    .bind(content_item_id)
    .bind(version_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(ContentError::VersionNotFound(version_id))?;

    let restored = sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET
            title = $1,
            body = $2,
            excerpt = $3,
            tags = $4,
            categories = $5,
            images = $6,
            seo_title = $7,
            seo_description = $8,
            updated_at = now()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(&version.title)
    .bind(&version.body)
    .bind(&version.excerpt)
    .bind(&version.tags)
    .bind(&version.categories)
    .bind(&version.images)
    .bind(version.seo_title.as_deref())
    .bind(version.seo_description.as_deref())
    .bind(content_item_id)
    .fetch_one(&mut *tx)
    .await?;

    let next = max_rev(&mut tx, content_item_id).await? + 1;
    let description = format!("restored from v{}", version.rev);
    insert_snapshot(&mut tx, &restored, next, Some(&description), actor_user_id).await?;

    tx.commit().await?;
    Ok(restored)
}

async fn max_rev(
    tx: &mut Transaction<'_, Postgres>,
    content_item_id: Uuid,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        SELECT COALESCE(MAX(rev), 0)
        FROM content_versions
        WHERE content_item_id = $1
        "#,
    )
    .bind(content_item_id)
    .fetch_one(&mut **tx)
    .await
}

async fn insert_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    item: &ContentItem,
    rev: i32,
    change_description: Option<&str>,
    actor_user_id: Option<Uuid>,
) -> Result<ContentVersion, sqlx::Error> {
    sqlx::query_as::<_, ContentVersion>(
        r#"
        INSERT INTO content_versions (
            content_item_id,
            rev,
            title,
            body,
            excerpt,
            tags,
            categories,
            images,
            seo_title,
            seo_description,
            status,
            change_description,
            created_by_user_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(item.id)
    .bind(rev)
    .bind(&item.title)
    .bind(&item.body)
    .bind(&item.excerpt)
    .bind(&item.tags)
    .bind(&item.categories)
    .bind(&item.images)
    .bind(item.seo_title.as_deref())
    .bind(item.seo_description.as_deref())
    .bind(item.status.as_str())
    .bind(change_description)
    .bind(actor_user_id)
    .fetch_one(&mut **tx)
    .await
}
