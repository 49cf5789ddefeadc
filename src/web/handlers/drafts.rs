use actix_web::{delete, get, put, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use craftpress::db;

use crate::web::forms::DraftForm;
use crate::web::helpers::{content_error, require_user, ErrorBody};
use crate::web::state::AppState;

/// Explicit draft write. Background autosave uses the same semantics via
/// `services::AutosaveSession`; this endpoint is the transport for it and
/// for explicit "save draft" actions, so unlike autosave it does report
/// failures to the caller.
#[put("/content/{id}/draft")]
pub async fn save_draft(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Json<DraftForm>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::save_draft(&state.pool, id, form.session_id, &form.as_fields()).await {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => content_error(e),
    }
}

#[get("/content/{id}/draft")]
pub async fn get_draft(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::get_draft(&state.pool, id).await {
        Ok(Some(draft)) => HttpResponse::Ok().json(draft),
        Ok(None) => HttpResponse::NotFound().json(ErrorBody::new(format!(
            "No draft for content item {id}"
        ))),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[delete("/content/{id}/draft")]
pub async fn discard_draft(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::discard_draft(&state.pool, id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorBody::new(format!(
            "No draft for content item {id}"
        ))),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(save_draft)
        .service(get_draft)
        .service(discard_draft);
}
