use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::common::ContentError;
use crate::models::{
    ContentCreate, ContentItem, ContentKind, ContentPatch, ContentStatus, ContentUpdate,
};
use crate::services::{next_status, validate_for_publishing, WorkflowAction};

pub async fn create_content(
    pool: &PgPool,
    data: &ContentCreate,
) -> Result<ContentItem, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        INSERT INTO content_items (
            author_user_id, kind, status, title, body, excerpt,
            tags, categories, images, seo_title, seo_description
        )
        VALUES ($1, $2, 'draft', $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(data.author_user_id)
    .bind(data.kind.as_str())
    .bind(&data.title)
    .bind(&data.body)
    .bind(&data.excerpt)
    .bind(&data.tags)
    .bind(&data.categories)
    .bind(&data.images)
    .bind(data.seo_title.as_deref())
    .bind(data.seo_description.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn get_content_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT *
        FROM content_items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_content(
    pool: &PgPool,
    kind: Option<ContentKind>,
    status: Option<ContentStatus>,
) -> Result<Vec<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT *
        FROM content_items
        WHERE ($1::text IS NULL OR kind = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(kind.map(|k| k.as_str()))
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await
}

pub async fn update_content(
    pool: &PgPool,
    id: Uuid,
    data: &ContentUpdate,
) -> Result<Option<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET
            title = COALESCE($1, title),
            body = COALESCE($2, body),
            excerpt = COALESCE($3, excerpt),
            tags = COALESCE($4, tags),
            categories = COALESCE($5, categories),
            images = COALESCE($6, images),
            seo_title = COALESCE($7, seo_title),
            seo_description = COALESCE($8, seo_description),
            updated_at = now()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(data.title.as_deref())
    .bind(data.body.as_deref())
    .bind(data.excerpt.as_deref())
    .bind(data.tags.as_deref())
    .bind(data.categories.as_deref())
    .bind(data.images.as_deref())
    .bind(data.seo_title.as_deref())
    .bind(data.seo_description.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn patch_content(
    pool: &PgPool,
    id: Uuid,
    data: &ContentPatch,
) -> Result<Option<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET
            featured = COALESCE($1, featured),
            seo_title = COALESCE($2, seo_title),
            seo_description = COALESCE($3, seo_description),
            updated_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(data.featured)
    .bind(data.seo_title.as_deref())
    .bind(data.seo_description.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Permanent delete. Versions and the working draft go with it (cascade);
/// approval requests stay behind and decide as content-not-found.
pub async fn delete_content(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM content_items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_due_scheduled(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT *
        FROM content_items
        WHERE status = 'scheduled' AND scheduled_for <= $1
        ORDER BY scheduled_for ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await
}

/// A lifecycle change that went through, plus any advisory warnings the
/// validation gate produced on the way.
#[derive(Debug, Clone, Serialize)]
pub struct Transitioned {
    pub item: ContentItem,
    pub warnings: Vec<String>,
}

/// Applies a workflow action to one item: lock the row, consult the
/// transition table, run the publish gate where the target state requires
/// it, then write the status and its derived fields.
pub async fn apply_transition(
    pool: &PgPool,
    id: Uuid,
    action: WorkflowAction,
) -> Result<Transitioned, ContentError> {
    let mut tx = pool.begin().await?;
    let item = lock_content(&mut tx, id)
        .await?
        .ok_or(ContentError::NotFound(id))?;

    let transitioned = transition_in_tx(&mut tx, &item, action).await?;
    tx.commit().await?;

    Ok(transitioned)
}

pub(crate) async fn lock_content(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<ContentItem>, sqlx::Error> {
    sqlx::query_as::<_, ContentItem>(
        r#"
        SELECT *
        FROM content_items
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

pub(crate) async fn transition_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    item: &ContentItem,
    action: WorkflowAction,
) -> Result<Transitioned, ContentError> {
    let next = next_status(item.status, &action)?;
    let now = Utc::now();

    let mut warnings = Vec::new();
    if matches!(next, ContentStatus::Published | ContentStatus::Scheduled) {
        let mut report = validate_for_publishing(item);
        if let WorkflowAction::Schedule { at } = action {
            if at <= now {
                report.errors.push("scheduled time must be in the future".to_string());
                report.is_valid = false;
            }
        }
        if !report.is_valid {
            return Err(ContentError::ValidationFailed(report));
        }
        warnings = report.warnings;
    }

    // published_at marks the most recent go-live; unpublishing keeps the
    // old timestamp as history. scheduled_for only survives while Scheduled.
    let (published_at, scheduled_for) = match (next, action) {
        (ContentStatus::Published, _) => (Some(now), None),
        (ContentStatus::Scheduled, WorkflowAction::Schedule { at }) => {
            (item.published_at, Some(at))
        }
        _ => (item.published_at, None),
    };

    let updated = sqlx::query_as::<_, ContentItem>(
        r#"
        UPDATE content_items
        SET
            status = $1,
            published_at = $2,
            scheduled_for = $3,
            updated_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(next.as_str())
    .bind(published_at)
    .bind(scheduled_for)
    .bind(item.id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(Transitioned {
        item: updated,
        warnings,
    })
}
