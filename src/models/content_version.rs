use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ContentStatus;

/// Immutable snapshot of a content item's editable fields.
/// Append-only; rows only disappear when the parent item is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentVersion {
    pub id: Uuid,
    pub content_item_id: Uuid,
    pub rev: i32,

    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub images: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub status: ContentStatus,

    pub change_description: Option<String>,
    pub created_by_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentVersionMeta {
    pub id: Uuid,
    pub rev: i32,
    pub title: String,
    pub status: ContentStatus,
    pub change_description: Option<String>,
    pub created_by_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
