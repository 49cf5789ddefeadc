use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use uuid::Uuid;

use craftpress::db;

use crate::web::forms::VersionsQuery;
use crate::web::helpers::{content_error, require_user, ErrorBody};
use crate::web::state::AppState;

#[get("/content/{id}/versions")]
pub async fn list_versions(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<VersionsQuery>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let id = path.into_inner();
    match db::get_content_by_id(&state.pool, id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(ErrorBody::new(format!("Content item {id} not found")));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string()));
        }
    }

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    match db::list_versions(&state.pool, id, limit).await {
        Ok(versions) => HttpResponse::Ok().json(versions),
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[get("/content/{id}/versions/{vid}")]
pub async fn get_version(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    if let Err(resp) = require_user(&req) {
        return resp;
    }

    let (id, vid) = path.into_inner();
    match db::get_version(&state.pool, id, vid).await {
        Ok(Some(version)) => HttpResponse::Ok().json(version),
        Ok(None) => {
            HttpResponse::NotFound().json(ErrorBody::new(format!("Version {vid} not found")))
        }
        Err(e) => HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string())),
    }
}

#[post("/content/{id}/versions/{vid}/restore")]
pub async fn restore_version(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let uid = match require_user(&req) {
        Ok(uid) => uid,
        Err(resp) => return resp,
    };

    let (id, vid) = path.into_inner();
    match db::restore_version(&state.pool, id, vid, Some(uid)).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => content_error(e),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_versions)
        .service(get_version)
        .service(restore_version);
}
