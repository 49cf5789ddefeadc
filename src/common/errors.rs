use thiserror::Error;
use uuid::Uuid;

use crate::models::ContentStatus;
use crate::services::{ValidationReport, WorkflowAction};

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content item {0} not found")]
    NotFound(Uuid),

    #[error("Validation failed: {}", .0.errors.join("; "))]
    ValidationFailed(ValidationReport),

    #[error("Cannot {action} content in state {from}")]
    InvalidTransition {
        from: ContentStatus,
        action: WorkflowAction,
    },

    #[error("Version {0} not found")]
    VersionNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ApprovalError {
    #[error("Approval request {0} not found")]
    RequestNotFound(Uuid),

    #[error("Approval request {0} has already been decided")]
    AlreadyDecided(Uuid),

    #[error("A comment is required when rejecting or requesting changes")]
    MissingComment,

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
