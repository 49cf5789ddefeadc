mod common;

#[cfg(test)]
pub mod content_tests {
    use chrono::{Duration, Utc};
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::common::*;

    use craftpress::common::ContentError;
    use craftpress::db::*;
    use craftpress::models::*;
    use craftpress::services::{sweep_once, WorkflowAction};

    #[sqlx::test(migrations = "./migrations")]
    async fn publishing_sets_status_and_timestamp(pool: PgPool) {
        let before = Utc::now();
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();
        assert_eq!(item.status, ContentStatus::Draft);
        assert!(item.published_at.is_none());

        let t = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Published);
        assert!(t.item.published_at.unwrap() >= before);
        assert!(t.warnings.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn empty_body_blocks_publish(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", ""))
            .await
            .unwrap();

        let err = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap_err();
        match err {
            ContentError::ValidationFailed(report) => {
                assert_eq!(report.errors, vec!["body required".to_string()]);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        // Failed publish leaves the item untouched.
        let fetched = get_content_by_id(&pool, item.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ContentStatus::Draft);
        assert!(fetched.published_at.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn portfolio_item_needs_an_image_to_publish(pool: PgPool) {
        let item = create_content(
            &pool,
            &portfolio_create("Compressor swap", "Full writeup", vec![]),
        )
        .await
        .unwrap();

        let err = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap_err();
        match err {
            ContentError::ValidationFailed(report) => {
                assert!(report.errors.iter().any(|e| e.contains("image")));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn scheduling_requires_a_future_time(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();

        let past = Utc::now() - Duration::minutes(5);
        let err = apply_transition(&pool, item.id, WorkflowAction::Schedule { at: past })
            .await
            .unwrap_err();
        match err {
            ContentError::ValidationFailed(report) => {
                assert!(report.errors.iter().any(|e| e.contains("future")));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        let tomorrow = Utc::now() + Duration::days(1);
        let t = apply_transition(&pool, item.id, WorkflowAction::Schedule { at: tomorrow })
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Scheduled);
        // Postgres keeps microseconds; compare at that precision.
        assert_eq!(
            t.item.scheduled_for.unwrap().timestamp_micros(),
            tomorrow.timestamp_micros()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn scheduled_item_publishes_when_triggered(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();
        let tomorrow = Utc::now() + Duration::days(1);
        apply_transition(&pool, item.id, WorkflowAction::Schedule { at: tomorrow })
            .await
            .unwrap();

        // The external trigger is just the publish transition.
        let t = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Published);
        assert!(t.item.published_at.is_some());
        assert!(t.item.scheduled_for.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn sweep_publishes_only_due_items(pool: PgPool) {
        let due = create_content(&pool, &blog_create("Due", "Body"))
            .await
            .unwrap();
        let later = create_content(&pool, &blog_create("Later", "Body"))
            .await
            .unwrap();

        let tomorrow = Utc::now() + Duration::days(1);
        apply_transition(&pool, due.id, WorkflowAction::Schedule { at: tomorrow })
            .await
            .unwrap();
        apply_transition(&pool, later.id, WorkflowAction::Schedule { at: tomorrow })
            .await
            .unwrap();

        // Nothing due yet.
        assert_eq!(sweep_once(&pool).await.unwrap(), 0);

        // Bring one item's schedule into the past.
        sqlx::query(
            "UPDATE content_items SET scheduled_for = now() - interval '1 minute' WHERE id = $1",
        )
        .bind(due.id)
        .execute(&pool)
        .await
        .unwrap();

        assert_eq!(sweep_once(&pool).await.unwrap(), 1);

        let due = get_content_by_id(&pool, due.id).await.unwrap().unwrap();
        assert_eq!(due.status, ContentStatus::Published);
        assert!(due.published_at.is_some());

        let later = get_content_by_id(&pool, later.id).await.unwrap().unwrap();
        assert_eq!(later.status, ContentStatus::Scheduled);
        assert_eq!(
            later.scheduled_for.unwrap().timestamp_micros(),
            tomorrow.timestamp_micros()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn archived_items_only_restore(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();
        apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap();
        apply_transition(&pool, item.id, WorkflowAction::Archive)
            .await
            .unwrap();

        let err = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::InvalidTransition {
                from: ContentStatus::Archived,
                action: WorkflowAction::Publish,
            }
        ));

        let t = apply_transition(&pool, item.id, WorkflowAction::Restore)
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Draft);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn unpublish_returns_to_draft(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();
        apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap();

        let t = apply_transition(&pool, item.id, WorkflowAction::Unpublish)
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Draft);
        // The historical go-live timestamp survives an unpublish.
        assert!(t.item.published_at.is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn transition_on_missing_item_is_not_found(pool: PgPool) {
        let ghost = Uuid::new_v4();
        let err = apply_transition(&pool, ghost, WorkflowAction::Publish)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(id) if id == ghost));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn seo_warnings_do_not_block_publish(pool: PgPool) {
        let mut data = blog_create("Test", "Body");
        data.seo_title = Some("x".repeat(80));
        let item = create_content(&pool, &data).await.unwrap();

        let t = apply_transition(&pool, item.id, WorkflowAction::Publish)
            .await
            .unwrap();
        assert_eq!(t.item.status, ContentStatus::Published);
        assert_eq!(t.warnings.len(), 1);
        assert!(t.warnings[0].contains("seo title"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn patch_only_touches_flags(pool: PgPool) {
        let item = create_content(&pool, &blog_create("Test", "Body"))
            .await
            .unwrap();
        assert!(!item.featured);

        let patched = patch_content(
            &pool,
            item.id,
            &ContentPatch {
                featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert!(patched.featured);
        assert_eq!(patched.status, ContentStatus::Draft);
        assert_eq!(patched.title, "Test");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn list_filters_by_kind_and_status(pool: PgPool) {
        let blog = create_content(&pool, &blog_create("Post", "Body"))
            .await
            .unwrap();
        create_content(
            &pool,
            &portfolio_create("Job", "Writeup", vec!["a.jpg".to_string()]),
        )
        .await
        .unwrap();
        apply_transition(&pool, blog.id, WorkflowAction::Publish)
            .await
            .unwrap();

        let published = list_content(&pool, None, Some(ContentStatus::Published))
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id, blog.id);

        let portfolios = list_content(&pool, Some(ContentKind::PortfolioItem), None)
            .await
            .unwrap();
        assert_eq!(portfolios.len(), 1);

        let all = list_content(&pool, None, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
