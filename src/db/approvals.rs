use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::common::{ApprovalError, ContentError};
use crate::models::{ApprovalRequest, ApprovalStatus, RequestedAction};
use crate::services::{ValidationReport, WorkflowAction};

use super::{lock_content, transition_in_tx, Transitioned};

/// Submits an item for review: Draft -> PendingApproval plus a pending
/// request, in one transaction. The publish gate runs at decision time, not
/// here, so content edited while pending is re-checked before going live.
pub async fn request_approval(
    pool: &PgPool,
    content_item_id: Uuid,
    requested_by: Option<Uuid>,
    message: Option<&str>,
    action: RequestedAction,
    scheduled_for: Option<DateTime<Utc>>,
) -> Result<ApprovalRequest, ApprovalError> {
    if action == RequestedAction::Schedule && scheduled_for.is_none() {
        let report = ValidationReport::from_parts(
            vec!["scheduled_for required for schedule requests".to_string()],
            vec![],
        );
        return Err(ContentError::ValidationFailed(report).into());
    }

    let mut tx = pool.begin().await?;

    let item = lock_content(&mut tx, content_item_id)
        .await?
        .ok_or(ContentError::NotFound(content_item_id))?;

    transition_in_tx(&mut tx, &item, WorkflowAction::Submit).await?;

    let request = sqlx::query_as::<_, ApprovalRequest>(
        r#"
        INSERT INTO approval_requests (
            content_item_id, requested_by, message, requested_action, scheduled_for
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(content_item_id)
    .bind(requested_by)
    .bind(message)
    .bind(action.as_str())
    .bind(scheduled_for)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(request)
}

pub async fn get_request(
    pool: &PgPool,
    request_id: Uuid,
) -> Result<Option<ApprovalRequest>, sqlx::Error> {
    sqlx::query_as::<_, ApprovalRequest>(
        r#"
        SELECT *
        FROM approval_requests
        WHERE id = $1
        "#,
    )
    .bind(request_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_requests(
    pool: &PgPool,
    status: Option<ApprovalStatus>,
) -> Result<Vec<ApprovalRequest>, sqlx::Error> {
    sqlx::query_as::<_, ApprovalRequest>(
        r#"
        SELECT *
        FROM approval_requests
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    pub request: ApprovalRequest,
    pub item: crate::models::ContentItem,
    pub warnings: Vec<String>,
}

/// Applies the originally requested action. Comment is optional here.
/// If the item was deleted while the request sat in the queue, this fails
/// with ContentNotFound and the request stays Pending (retryable).
pub async fn approve(
    pool: &PgPool,
    request_id: Uuid,
    reviewed_by: Option<Uuid>,
    comment: Option<&str>,
) -> Result<ApprovalOutcome, ApprovalError> {
    decide(pool, request_id, reviewed_by, comment, ApprovalStatus::Approved).await
}

/// Returns the item to Draft. The reviewer must say why.
pub async fn reject(
    pool: &PgPool,
    request_id: Uuid,
    reviewed_by: Option<Uuid>,
    comment: &str,
) -> Result<ApprovalOutcome, ApprovalError> {
    if comment.trim().is_empty() {
        return Err(ApprovalError::MissingComment);
    }
    decide(pool, request_id, reviewed_by, Some(comment), ApprovalStatus::Rejected).await
}

/// Like reject, but signals the author should revise and resubmit.
pub async fn request_changes(
    pool: &PgPool,
    request_id: Uuid,
    reviewed_by: Option<Uuid>,
    comment: &str,
) -> Result<ApprovalOutcome, ApprovalError> {
    if comment.trim().is_empty() {
        return Err(ApprovalError::MissingComment);
    }
    decide(
        pool,
        request_id,
        reviewed_by,
        Some(comment),
        ApprovalStatus::ChangesRequested,
    )
    .await
}

async fn decide(
    pool: &PgPool,
    request_id: Uuid,
    reviewed_by: Option<Uuid>,
    comment: Option<&str>,
    verdict: ApprovalStatus,
) -> Result<ApprovalOutcome, ApprovalError> {
    let mut tx = pool.begin().await?;

    let request = lock_request(&mut tx, request_id)
        .await?
        .ok_or(ApprovalError::RequestNotFound(request_id))?;

    if request.status != ApprovalStatus::Pending {
        return Err(ApprovalError::AlreadyDecided(request_id));
    }

    let item = lock_content(&mut tx, request.content_item_id)
        .await?
        .ok_or(ContentError::NotFound(request.content_item_id))?;

    let action = match verdict {
        ApprovalStatus::Approved => match request.requested_action {
            RequestedAction::Publish => WorkflowAction::Publish,
            RequestedAction::Schedule => {
                let at = request.scheduled_for.ok_or_else(|| {
                    ContentError::ValidationFailed(ValidationReport::from_parts(
                        vec!["request has no scheduled time".to_string()],
                        vec![],
                    ))
                })?;
                WorkflowAction::Schedule { at }
            }
        },
        _ => WorkflowAction::ReturnToDraft,
    };

    let Transitioned { item, warnings } = transition_in_tx(&mut tx, &item, action).await?;

    let request = sqlx::query_as::<_, ApprovalRequest>(
        r#"
        UPDATE approval_requests
        SET
            status = $1,
            reviewer_comment = $2,
            reviewed_by = $3,
            decided_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(verdict.as_str())
    .bind(comment)
    .bind(reviewed_by)
    .bind(request_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ApprovalOutcome {
        request,
        item,
        warnings,
    })
}

async fn lock_request(
    tx: &mut Transaction<'_, Postgres>,
    request_id: Uuid,
) -> Result<Option<ApprovalRequest>, sqlx::Error> {
    sqlx::query_as::<_, ApprovalRequest>(
        r#"
        SELECT *
        FROM approval_requests
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(request_id)
    .fetch_optional(&mut **tx)
    .await
}
