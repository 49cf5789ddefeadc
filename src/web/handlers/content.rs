use actix_web::{delete, get, patch, post, put, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use craftpress::db;
use craftpress::models::{ContentCreate, ContentPatch};
use craftpress::services::WorkflowAction;

use crate::web::forms::{ContentCreateForm, ContentListQuery, ContentUpdateForm, PublishForm, ScheduleForm};
use crate::web::helpers::{content_error, require_user, ErrorBody};
use crate::web::state::AppState;

#[post("/content")]
pub async fn create_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<ContentCreateForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let data = ContentCreate {
        author_user_id: Some(uid),
        kind: form.kind,
        title: form.title.trim().to_string(),
        body: form.body.clone(),
        excerpt: form.excerpt.clone(),
        tags: form.tags.clone(),
        categories: form.categories.clone(),
        images: form.images.clone(),
        seo_title: form.seo_title.clone(),
        seo_description: form.seo_description.clone(),
    };

    let created = match db::create_content(&state.pool, &data).await {
        Ok(item) => item,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new(format!("Create failed: {e}")));
        }
    };

    // Seed history immediately so every item has a v1 to restore to.
    if let Err(e) =
        db::record_version(&state.pool, created.id, Some("initial version"), Some(uid)).await
    {
        return content_error(e);
    }

    HttpResponse::Created().json(created)
}

#[get("/content")]
pub async fn list_content(
    state: web::Data<AppState>,
    query: web::Query<ContentListQuery>,
) -> impl Responder {
    match db::list_content(&state.pool, query.kind, query.status).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[get("/content/{id}")]
pub async fn get_content(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match db::get_content_by_id(&state.pool, id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NotFound().json(ErrorBody::new(format!(
            "Content item {id} not found"
        ))),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[put("/content/{id}")]
pub async fn update_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Json<ContentUpdateForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();
    let updated = match db::update_content(&state.pool, id, &form.as_update()).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(ErrorBody::new(format!("Content item {id} not found")));
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new(format!("Update failed: {e}")));
        }
    };

    if form.record_version.unwrap_or(true) {
        if let Err(e) = db::record_version(
            &state.pool,
            id,
            form.change_description.as_deref(),
            Some(uid),
        )
        .await
        {
            return content_error(e);
        }
    }

    HttpResponse::Ok().json(updated)
}

#[patch("/content/{id}")]
pub async fn patch_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Json<ContentPatch>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::patch_content(&state.pool, id, &form).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NotFound().json(ErrorBody::new(format!(
            "Content item {id} not found"
        ))),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[delete("/content/{id}")]
pub async fn delete_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::delete_content(&state.pool, id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorBody::new(format!(
            "Content item {id} not found"
        ))),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[post("/content/{id}/publish")]
pub async fn publish_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: Option<web::Json<PublishForm>>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();

    // Fold the working draft in first so the gate sees the latest edits.
    if let Err(e) = db::promote_draft(&state.pool, id).await {
        return HttpResponse::InternalServerError()
            .json(ErrorBody::new(format!("Draft merge failed: {e}")));
    }

    let action = match form.and_then(|f| f.scheduled_for) {
        Some(at) => WorkflowAction::Schedule { at },
        None => WorkflowAction::Publish,
    };
    let description = match action {
        WorkflowAction::Schedule { .. } => "scheduled",
        _ => "published",
    };

    let transitioned = match db::apply_transition(&state.pool, id, action).await {
        Ok(t) => t,
        Err(e) => return content_error(e),
    };

    if let Err(e) = db::record_version(&state.pool, id, Some(description), Some(uid)).await {
        return content_error(e);
    }

    HttpResponse::Ok().json(transitioned)
}

#[post("/content/{id}/schedule")]
pub async fn schedule_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Json<ScheduleForm>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let id = path.into_inner();

    if let Err(e) = db::promote_draft(&state.pool, id).await {
        return HttpResponse::InternalServerError()
            .json(ErrorBody::new(format!("Draft merge failed: {e}")));
    }

    let action = WorkflowAction::Schedule {
        at: form.scheduled_for,
    };
    let transitioned = match db::apply_transition(&state.pool, id, action).await {
        Ok(t) => t,
        Err(e) => return content_error(e),
    };

    if let Err(e) = db::record_version(&state.pool, id, Some("scheduled"), Some(uid)).await {
        return content_error(e);
    }

    HttpResponse::Ok().json(transitioned)
}

#[post("/content/{id}/unpublish")]
pub async fn unpublish_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(state, req, path.into_inner(), WorkflowAction::Unpublish).await
}

#[post("/content/{id}/archive")]
pub async fn archive_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(state, req, path.into_inner(), WorkflowAction::Archive).await
}

#[post("/content/{id}/restore")]
pub async fn restore_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(state, req, path.into_inner(), WorkflowAction::Restore).await
}

async fn transition(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: Uuid,
    action: WorkflowAction,
) -> HttpResponse {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    match db::apply_transition(&state.pool, id, action).await {
        Ok(transitioned) => HttpResponse::Ok().json(transitioned),
        Err(e) => content_error(e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_content)
        .service(list_content)
        .service(get_content)
        .service(update_content)
        .service(patch_content)
        .service(delete_content)
        .service(publish_content)
        .service(schedule_content)
        .service(unpublish_content)
        .service(archive_content)
        .service(restore_content);
}
