use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ContentError;
use crate::models::ContentStatus;

/// A requested lifecycle change. `Schedule` carries the target time; the
/// transition table itself only cares about the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Submit,
    Publish,
    Schedule { at: DateTime<Utc> },
    Unpublish,
    Archive,
    Restore,
    ReturnToDraft,
}

impl WorkflowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Publish => "publish",
            Self::Schedule { .. } => "schedule",
            Self::Unpublish => "unpublish",
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::ReturnToDraft => "return_to_draft",
        }
    }
}

impl std::fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The transition table. Everything not listed here is an
/// `InvalidTransition`; callers never get a silent no-op.
///
/// Archived items accept nothing but `Restore`. The `Scheduled -> Published`
/// edge is driven by the publish sweep firing `Publish` at the scheduled
/// time, so it shares the plain publish edge.
pub fn next_status(
    current: ContentStatus,
    action: &WorkflowAction,
) -> Result<ContentStatus, ContentError> {
    use ContentStatus::*;
    use WorkflowAction::*;

    match (current, action) {
        (Draft, Submit) => Ok(PendingApproval),
        (Draft, Publish) => Ok(Published),
        (Draft, Schedule { .. }) => Ok(Scheduled),

        (PendingApproval, Publish) => Ok(Published),
        (PendingApproval, Schedule { .. }) => Ok(Scheduled),
        (PendingApproval, ReturnToDraft) => Ok(Draft),

        (Scheduled, Publish) => Ok(Published),

        (Published, Unpublish) => Ok(Draft),

        (Draft, Archive) | (Published, Archive) => Ok(Archived),

        (Archived, Restore) => Ok(Draft),

        (from, action) => Err(ContentError::InvalidTransition {
            from,
            action: *action,
        }),
    }
}
