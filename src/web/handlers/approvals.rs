use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use craftpress::db;
use craftpress::models::RequestedAction;

use crate::web::forms::{ApprovalCreateForm, ApprovalListQuery, ReviewForm};
use crate::web::helpers::{approval_error, require_user, ErrorBody};
use crate::web::state::AppState;

/// Body-less submit: files a pending publish request with no message.
/// `POST /content/{id}/approval-requests` is the full-fat form.
#[post("/content/{id}/submit")]
pub async fn submit_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let result = db::request_approval(
        &state.pool,
        id,
        Some(uid),
        None,
        RequestedAction::Publish,
        None,
    )
    .await;

    match result {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => approval_error(e),
    }
}

#[post("/content/{id}/approval-requests")]
pub async fn request_approval(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Json<ApprovalCreateForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let result = db::request_approval(
        &state.pool,
        id,
        Some(uid),
        form.message.as_deref(),
        form.requested_action,
        form.scheduled_for,
    )
    .await;

    match result {
        Ok(request) => HttpResponse::Created().json(request),
        Err(e) => approval_error(e),
    }
}

#[get("/approval-requests")]
pub async fn list_requests(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ApprovalListQuery>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    match db::list_requests(&state.pool, query.status).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[post("/approval-requests/{id}/approve")]
pub async fn approve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: Option<web::Json<ReviewForm>>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let comment = form.as_ref().and_then(|f| f.comment.as_deref());

    match db::approve(&state.pool, id, Some(uid), comment).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => approval_error(e),
    }
}

#[post("/approval-requests/{id}/reject")]
pub async fn reject(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: Option<web::Json<ReviewForm>>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let comment = form
        .as_ref()
        .and_then(|f| f.comment.as_deref())
        .unwrap_or("");

    match db::reject(&state.pool, id, Some(uid), comment).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => approval_error(e),
    }
}

#[post("/approval-requests/{id}/request-changes")]
pub async fn request_changes(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: Option<web::Json<ReviewForm>>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let comment = form
        .as_ref()
        .and_then(|f| f.comment.as_deref())
        .unwrap_or("");

    match db::request_changes(&state.pool, id, Some(uid), comment).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => approval_error(e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_content)
        .service(request_approval)
        .service(list_requests)
        .service(approve)
        .service(reject)
        .service(request_changes);
}
