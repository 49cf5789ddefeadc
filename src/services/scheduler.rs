use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::db;
use crate::log_err;
use crate::services::WorkflowAction;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic sweep that fires the publish transition for scheduled items
/// whose time has come. The workflow core only exposes the transition;
/// this is the collaborator that decides when to call it.
pub fn spawn_publish_sweep(pool: PgPool, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            if let Err(e) = sweep_once(&pool).await {
                tracing::warn!(error = %e, "scheduled-publish sweep failed");
            }
        }
    })
}

/// One pass over due items. Per-item failures are logged and left for the
/// next pass; the sweep never gives up on the rest of the batch.
pub async fn sweep_once(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let due = db::list_due_scheduled(pool, Utc::now()).await?;
    let mut published = 0usize;

    for item in due {
        match db::apply_transition(pool, item.id, WorkflowAction::Publish).await {
            Ok(_) => published += 1,
            Err(e) => {
                tracing::warn!(
                    content_item_id = %item.id,
                    error = %e,
                    "could not publish scheduled item"
                );
                log_err!(pool, &item);
            }
        }
    }

    if published > 0 {
        tracing::info!(published, "scheduled-publish sweep done");
    }

    Ok(published)
}
