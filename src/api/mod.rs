mod auth;
mod errors;
mod sessions;
mod teachers;
mod users;

use std::sync::Arc;

use actix_web::{get, web, HttpResponse, Responder};
pub use errors::ApiError;
pub(crate) use errors::{default_error_handler, parse_id};
use utoipa::openapi::OpenApi;
use utoipa_actix_web::service_config::ServiceConfig;

use crate::auth::AuthLayer;
use crate::AppState;

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is running")),
    summary = "Liveness check"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

pub(crate) async fn openapi_json(doc: web::Data<OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(doc.get_ref())
}

pub(crate) fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    let auth_layer = AuthLayer::new(state.tokens.clone(), Arc::new(state.user_ops.clone()));

    cfg.app_data(web::JsonConfig::default().error_handler(default_error_handler));
    cfg.service(root_endpoint);
    auth::config(cfg, &state.accounts);
    sessions::config(cfg, &state.session_ops, &auth_layer);
    teachers::config(cfg, &state.teacher_ops, &auth_layer);
    users::config(cfg, &state.user_ops, &state.accounts, &auth_layer);
}
