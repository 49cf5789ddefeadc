use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use craftpress::common::{ApprovalError, ContentError};

/// Structured error body: validation and transition failures are data,
/// never opaque exceptions across the API boundary.
#[derive(Serialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ErrorBody {
    pub fn new(message: String) -> Self {
        Self {
            errors: vec![message],
            warnings: vec![],
        }
    }
}

pub fn current_user_id(req: &HttpRequest) -> Option<Uuid> {
    // MVP session identity: the real session provider lives upstream.
    // Priority: request header -> env var.
    let header_val = req
        .headers()
        .get("X-Craftpress-User-Id")
        .or_else(|| req.headers().get("X-User-Id"))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok());

    header_val.or_else(|| {
        std::env::var("CRAFTPRESS_USER_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(&s).ok())
    })
}

pub fn require_user(req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    match current_user_id(req) {
        Some(uid) => Ok(uid),
        None => Err(HttpResponse::Unauthorized()
            .json(ErrorBody::new("missing or invalid user identity".to_string()))),
    }
}

pub fn content_error(e: ContentError) -> HttpResponse {
    match e {
        ContentError::NotFound(_) | ContentError::VersionNotFound(_) => {
            HttpResponse::NotFound().json(ErrorBody::new(e.to_string()))
        }
        ContentError::ValidationFailed(report) => {
            HttpResponse::UnprocessableEntity().json(ErrorBody {
                errors: report.errors,
                warnings: report.warnings,
            })
        }
        ContentError::InvalidTransition { .. } => {
            HttpResponse::Conflict().json(ErrorBody::new(e.to_string()))
        }
        ContentError::Database(_) => {
            HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string()))
        }
    }
}

pub fn approval_error(e: ApprovalError) -> HttpResponse {
    match e {
        ApprovalError::RequestNotFound(_) => {
            HttpResponse::NotFound().json(ErrorBody::new(e.to_string()))
        }
        ApprovalError::AlreadyDecided(_) => {
            HttpResponse::Conflict().json(ErrorBody::new(e.to_string()))
        }
        ApprovalError::MissingComment => {
            HttpResponse::BadRequest().json(ErrorBody::new(e.to_string()))
        }
        ApprovalError::Content(inner) => content_error(inner),
        ApprovalError::Database(_) => {
            HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string()))
        }
    }
}
