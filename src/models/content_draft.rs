use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Working copy of in-progress edits. At most one per content item;
/// autosave overwrites it in place, it is never versioned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentDraft {
    pub content_item_id: Uuid,
    pub session_id: Uuid,
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an autosave tick may carry. Absent fields keep their stored value;
/// present fields overwrite (last write wins, no conflict detection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl DraftFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.excerpt.is_none()
            && self.tags.is_none()
            && self.categories.is_none()
            && self.images.is_none()
            && self.seo_title.is_none()
            && self.seo_description.is_none()
    }
}
