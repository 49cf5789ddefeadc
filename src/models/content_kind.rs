use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    BlogPost,
    PortfolioItem,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlogPost => "blog_post",
            Self::PortfolioItem => "portfolio_item",
        }
    }
}

impl Default for ContentKind {
    fn default() -> Self {
        Self::BlogPost
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blog_post" => Ok(Self::BlogPost),
            "portfolio_item" => Ok(Self::PortfolioItem),
            _ => Err(format!("invalid content kind: {}", s)),
        }
    }
}
