use craftpress::models::{ContentCreate, ContentKind};

pub fn blog_create(title: &str, body: &str) -> ContentCreate {
    ContentCreate {
        author_user_id: None,
        kind: ContentKind::BlogPost,
        title: title.to_string(),
        body: body.to_string(),
        excerpt: String::new(),
        tags: vec!["electrical".to_string()],
        categories: vec![],
        images: vec![],
        seo_title: None,
        seo_description: None,
    }
}

pub fn portfolio_create(title: &str, body: &str, images: Vec<String>) -> ContentCreate {
    ContentCreate {
        author_user_id: None,
        kind: ContentKind::PortfolioItem,
        title: title.to_string(),
        body: body.to_string(),
        excerpt: String::new(),
        tags: vec![],
        categories: vec!["hvac".to_string()],
        images,
        seo_title: None,
        seo_description: None,
    }
}
