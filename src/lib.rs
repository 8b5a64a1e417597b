#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod traits;
pub mod validation;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App};
use utoipa_actix_web::AppExt;

use crate::auth::{JwtConfig, TokenService};
use crate::db::{DbPool, SessionOperations, TeacherOperations, UserOperations};
use crate::services::AccountService;

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub session_ops: SessionOperations,
    pub teacher_ops: TeacherOperations,
    pub accounts: AccountService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: DbPool, jwt: &JwtConfig) -> Self {
        let tokens = TokenService::new(jwt);
        let user_ops = UserOperations::new(pool.clone());
        let session_ops = SessionOperations::new(pool.clone());
        let teacher_ops = TeacherOperations::new(pool);
        let accounts = AccountService::new(user_ops.clone(), tokens.clone());
        AppState {
            user_ops,
            session_ops,
            teacher_ops,
            accounts,
            tokens,
        }
    }
}

/// Assembles the application: every route, the OpenAPI document collected from the route
/// annotations, and the shared middleware.
pub fn build_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let (app, openapi) = App::new()
        .into_utoipa_app()
        .configure(|cfg| api::configure(cfg, state))
        .split_for_parts();

    app.app_data(web::Data::new(openapi))
        .route("/api-docs/openapi.json", web::get().to(api::openapi_json))
        .wrap(NormalizePath::trim())
        .wrap(Logger::default())
}
