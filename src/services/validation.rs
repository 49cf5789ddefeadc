use serde::{Deserialize, Serialize};

use crate::models::{ContentItem, ContentKind};

/// Advisory SEO lengths. Exceeding them warns, never blocks.
pub const SEO_TITLE_ADVISORY_MAX: usize = 60;
pub const SEO_DESCRIPTION_ADVISORY_MAX: usize = 160;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Pre-publish gate. Publish and schedule transitions must abort on a
/// report with `is_valid == false`; warnings ride along either way.
pub fn validate_for_publishing(item: &ContentItem) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if item.title.trim().is_empty() {
        errors.push("title required".to_string());
    }

    if item.body.trim().is_empty() {
        errors.push("body required".to_string());
    }

    if item.kind == ContentKind::PortfolioItem && item.images.is_empty() {
        errors.push("at least one image required".to_string());
    }

    if let Some(seo_title) = &item.seo_title {
        if seo_title.chars().count() > SEO_TITLE_ADVISORY_MAX {
            warnings.push(format!(
                "seo title exceeds {} characters",
                SEO_TITLE_ADVISORY_MAX
            ));
        }
    }

    if let Some(seo_description) = &item.seo_description {
        if seo_description.chars().count() > SEO_DESCRIPTION_ADVISORY_MAX {
            warnings.push(format!(
                "seo description exceeds {} characters",
                SEO_DESCRIPTION_ADVISORY_MAX
            ));
        }
    }

    ValidationReport::from_parts(errors, warnings)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::ContentStatus;

    fn item(kind: ContentKind, title: &str, body: &str) -> ContentItem {
        let now = Utc::now();
        ContentItem {
            id: Uuid::new_v4(),
            author_user_id: None,
            kind,
            status: ContentStatus::Draft,
            title: title.to_string(),
            body: body.to_string(),
            excerpt: String::new(),
            tags: vec![],
            categories: vec![],
            images: vec![],
            featured: false,
            seo_title: None,
            seo_description: None,
            scheduled_for: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_body_is_an_error() {
        let report = validate_for_publishing(&item(ContentKind::BlogPost, "Test", ""));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["body required".to_string()]);
    }

    #[test]
    fn empty_title_is_an_error() {
        let report = validate_for_publishing(&item(ContentKind::BlogPost, "  ", "Body"));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["title required".to_string()]);
    }

    #[test]
    fn blog_post_with_title_and_body_passes() {
        let report = validate_for_publishing(&item(ContentKind::BlogPost, "Test", "Body"));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn portfolio_item_needs_an_image() {
        let mut it = item(ContentKind::PortfolioItem, "Panel upgrade", "Full rewire");
        let report = validate_for_publishing(&it);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("image")));

        it.images.push("https://cdn.example.com/panel.jpg".to_string());
        assert!(validate_for_publishing(&it).is_valid);
    }

    #[test]
    fn long_seo_fields_warn_without_blocking() {
        let mut it = item(ContentKind::BlogPost, "Test", "Body");
        it.seo_title = Some("x".repeat(SEO_TITLE_ADVISORY_MAX + 1));
        it.seo_description = Some("y".repeat(SEO_DESCRIPTION_ADVISORY_MAX + 1));

        let report = validate_for_publishing(&it);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 2);
    }
}
