use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use craftpress::models::{
    ContentKind, ContentStatus, ContentUpdate, DraftFields, RequestedAction,
};

#[derive(Deserialize)]
pub struct ContentCreateForm {
    pub kind: ContentKind,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

#[derive(Deserialize)]
pub struct ContentUpdateForm {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    /// Explicit saves snapshot history unless the caller opts out.
    pub record_version: Option<bool>,
    pub change_description: Option<String>,
}

impl ContentUpdateForm {
    pub fn as_update(&self) -> ContentUpdate {
        ContentUpdate {
            title: self.title.clone(),
            body: self.body.clone(),
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            images: self.images.clone(),
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct ContentListQuery {
    pub kind: Option<ContentKind>,
    pub status: Option<ContentStatus>,
}

#[derive(Deserialize)]
pub struct PublishForm {
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ScheduleForm {
    pub scheduled_for: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct VersionsQuery {
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct DraftForm {
    pub session_id: Uuid,
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

impl DraftForm {
    pub fn as_fields(&self) -> DraftFields {
        DraftFields {
            title: self.title.clone(),
            body: self.body.clone(),
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
            categories: self.categories.clone(),
            images: self.images.clone(),
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct ApprovalCreateForm {
    pub message: Option<String>,
    pub requested_action: RequestedAction,
    pub scheduled_for: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ReviewForm {
    pub comment: Option<String>,
}

#[derive(Deserialize)]
pub struct ApprovalListQuery {
    pub status: Option<craftpress::models::ApprovalStatus>,
}
