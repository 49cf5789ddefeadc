use sqlx::PgPool;
use uuid::Uuid;

use crate::common::ContentError;
use crate::models::{ContentDraft, ContentItem, DraftFields};

/// Upserts the single working draft for an item. Provided fields overwrite,
/// absent fields keep their stored value. Last write wins across sessions;
/// the writing session id is recorded so lost updates stay observable.
pub async fn save_draft(
    pool: &PgPool,
    content_item_id: Uuid,
    session_id: Uuid,
    fields: &DraftFields,
) -> Result<ContentDraft, ContentError> {
    let draft = sqlx::query_as::<_, ContentDraft>(
        r#"
        INSERT INTO content_drafts (
            content_item_id, session_id, title, body, excerpt,
            tags, categories, images, seo_title, seo_description
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (content_item_id) DO UPDATE SET
            session_id = EXCLUDED.session_id,
            title = COALESCE(EXCLUDED.title, content_drafts.title),
            body = COALESCE(EXCLUDED.body, content_drafts.body),
            excerpt = COALESCE(EXCLUDED.excerpt, content_drafts.excerpt),
            tags = COALESCE(EXCLUDED.tags, content_drafts.tags),
            categories = COALESCE(EXCLUDED.categories, content_drafts.categories),
            images = COALESCE(EXCLUDED.images, content_drafts.images),
            seo_title = COALESCE(EXCLUDED.seo_title, content_drafts.seo_title),
            seo_description = COALESCE(EXCLUDED.seo_description, content_drafts.seo_description),
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(content_item_id)
    .bind(session_id)
    .bind(fields.title.as_deref())
    .bind(fields.body.as_deref())
    .bind(fields.excerpt.as_deref())
    .bind(fields.tags.as_deref())
    .bind(fields.categories.as_deref())
    .bind(fields.images.as_deref())
    .bind(fields.seo_title.as_deref())
    .bind(fields.seo_description.as_deref())
    .fetch_one(pool)
    .await
    // The FK to content_items is the existence check; a separate SELECT
    // would race with a concurrent delete.
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            ContentError::NotFound(content_item_id)
        }
        _ => ContentError::Database(e),
    })?;

    Ok(draft)
}

pub async fn get_draft(
    pool: &PgPool,
    content_item_id: Uuid,
) -> Result<Option<ContentDraft>, sqlx::Error> {
    sqlx::query_as::<_, ContentDraft>(
        r#"
        SELECT *
        FROM content_drafts
        WHERE content_item_id = $1
        "#,
    )
    .bind(content_item_id)
    .fetch_optional(pool)
    .await
}

pub async fn discard_draft(pool: &PgPool, content_item_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM content_drafts
        WHERE content_item_id = $1
        "#,
    )
    .bind(content_item_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Folds the working draft into the item and deletes it. Publish calls this
/// first so the gate sees what the editor last typed, not a stale record.
/// Returns None when there was no draft to fold.
pub async fn promote_draft(
    pool: &PgPool,
    content_item_id: Uuid,
) -> Result<Option<ContentItem>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let merged = sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items c
        SET
            title = COALESCE(d.title, c.title),
            body = COALESCE(d.body, c.body),
            excerpt = COALESCE(d.excerpt, c.excerpt),
            tags = COALESCE(d.tags, c.tags),
            categories = COALESCE(d.categories, c.categories),
            images = COALESCE(d.images, c.images),
            seo_title = COALESCE(d.seo_title, c.seo_title),
            seo_description = COALESCE(d.seo_description, c.seo_description),
            updated_at = now()
        FROM content_drafts d
        WHERE d.content_item_id = c.id AND c.id = $1
        RETURNING c.*
        "#,
    )
    .bind(content_item_id)
    .fetch_optional(&mut *tx)
    .await?;

    if merged.is_some() {
        sqlx::query(
            r#"
            DELETE FROM content_drafts
            WHERE content_item_id = $1
            "#,
        )
        .bind(content_item_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(merged)
}
