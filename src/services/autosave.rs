use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::common::ContentError;
use crate::db;
use crate::models::DraftFields;

pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Where autosave ticks land. The server writes through Postgres; tests
/// substitute an in-memory sink.
pub trait DraftSink: Send + Sync + 'static {
    fn save(
        &self,
        content_item_id: Uuid,
        session_id: Uuid,
        fields: DraftFields,
    ) -> impl Future<Output = Result<(), ContentError>> + Send;
}

pub struct PgDraftSink {
    pool: PgPool,
}

impl PgDraftSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DraftSink for PgDraftSink {
    fn save(
        &self,
        content_item_id: Uuid,
        session_id: Uuid,
        fields: DraftFields,
    ) -> impl Future<Output = Result<(), ContentError>> + Send {
        async move {
            db::save_draft(&self.pool, content_item_id, session_id, &fields)
                .await
                .map(|_| ())
        }
    }
}

/// Background writer for one open editing session. Reads the editor's
/// current fields from a `watch` channel on a fixed tick and persists them.
///
/// Failures are logged and swallowed: autosave must never interrupt an
/// editing session. Only explicit save/publish surfaces persistence errors.
pub struct AutosaveSession {
    handle: JoinHandle<()>,
}

impl AutosaveSession {
    pub fn spawn<S: DraftSink>(
        sink: S,
        content_item_id: Uuid,
        session_id: Uuid,
        fields: watch::Receiver<DraftFields>,
        interval: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick fires immediately; wait a full interval instead.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let snapshot = fields.borrow().clone();
                if !worth_persisting(&snapshot) {
                    continue;
                }

                if let Err(e) = sink.save(content_item_id, session_id, snapshot).await {
                    tracing::warn!(
                        content_item_id = %content_item_id,
                        session_id = %session_id,
                        error = %e,
                        "autosave failed, will retry next tick"
                    );
                }
            }
        });

        Self { handle }
    }

    /// Ends the session. The editor must call this (or drop the session)
    /// when it closes so no writes land after the session is gone.
    pub fn stop(self) {}
}

impl Drop for AutosaveSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A draft without both a title and a body is garbage we don't persist.
fn worth_persisting(fields: &DraftFields) -> bool {
    matches!(&fields.title, Some(t) if !t.trim().is_empty())
        && matches!(&fields.body, Some(b) if !b.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct MemorySink {
        saves: Arc<Mutex<Vec<DraftFields>>>,
    }

    impl MemorySink {
        fn count(&self) -> usize {
            self.saves.lock().unwrap().len()
        }
    }

    impl DraftSink for MemorySink {
        fn save(
            &self,
            _content_item_id: Uuid,
            _session_id: Uuid,
            fields: DraftFields,
        ) -> impl Future<Output = Result<(), ContentError>> + Send {
            let saves = self.saves.clone();
            async move {
                saves.lock().unwrap().push(fields);
                Ok(())
            }
        }
    }

    #[derive(Clone, Default)]
    struct FailingSink {
        attempts: Arc<Mutex<usize>>,
    }

    impl DraftSink for FailingSink {
        fn save(
            &self,
            _content_item_id: Uuid,
            _session_id: Uuid,
            _fields: DraftFields,
        ) -> impl Future<Output = Result<(), ContentError>> + Send {
            let attempts = self.attempts.clone();
            async move {
                *attempts.lock().unwrap() += 1;
                Err(ContentError::Database(sqlx::Error::PoolClosed))
            }
        }
    }

    fn complete_draft() -> DraftFields {
        DraftFields {
            title: Some("Test".to_string()),
            body: Some("Body".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn persists_on_each_tick_once_fields_are_complete() {
        let sink = MemorySink::default();
        let (tx, rx) = watch::channel(DraftFields::default());
        let session = AutosaveSession::spawn(
            sink.clone(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            rx,
            Duration::from_secs(30),
        );

        // Incomplete draft: ticks pass with nothing written.
        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(sink.count(), 0);

        tx.send(complete_draft()).unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(sink.count(), 2);

        session.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn skips_drafts_missing_title_or_body() {
        let sink = MemorySink::default();
        let (tx, rx) = watch::channel(DraftFields {
            title: Some("Test".to_string()),
            body: Some("   ".to_string()),
            ..Default::default()
        });
        let _session = AutosaveSession::spawn(
            sink.clone(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            rx,
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert_eq!(sink.count(), 0);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_failures_are_swallowed_and_retried() {
        let sink = FailingSink::default();
        let (_tx, rx) = watch::channel(complete_draft());
        let _session = AutosaveSession::spawn(
            sink.clone(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            rx,
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(95)).await;
        // Three ticks, three attempts, no panic, loop still alive.
        assert_eq!(*sink.attempts.lock().unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_future_ticks() {
        let sink = MemorySink::default();
        let (_tx, rx) = watch::channel(complete_draft());
        let session = AutosaveSession::spawn(
            sink.clone(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            rx,
            Duration::from_secs(30),
        );

        tokio::time::sleep(Duration::from_secs(35)).await;
        assert_eq!(sink.count(), 1);

        session.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(sink.count(), 1);
    }
}
