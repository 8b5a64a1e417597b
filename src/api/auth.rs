use crate::api::ApiError;
use crate::enums::auth::{JwtResp, LoginReq, SignupReq};
use crate::enums::common::MessageResponse;
use crate::services::AccountService;
use actix_web::{post, web, HttpResponse};
use log::{debug, error};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub(super) fn config(cfg: &mut ServiceConfig, accounts: &AccountService) {
    cfg.service(
        scope::scope("/api/auth")
            .app_data(web::Data::new(accounts.clone()))
            .service(login)
            .service(register),
    );
}

#[utoipa::path(
    tag = "Auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Credentials accepted, bearer token issued", body = JwtResp),
        (status = 400, description = "Email or password missing", body = MessageResponse),
        (status = 401, description = "Bad credentials", body = MessageResponse)
    ),
    summary = "Log in and obtain a bearer token"
)]
#[post("/login")]
pub(super) async fn login(
    accounts: web::Data<AccountService>,
    req_body: web::Json<LoginReq>,
) -> Result<HttpResponse, ApiError> {
    let email = req_body.email.clone();
    let accounts = accounts.into_inner();
    match web::block(move || accounts.login(req_body.into_inner())).await? {
        Ok(jwt) => {
            debug!("login: user '{}' authenticated", email);
            Ok(HttpResponse::Ok().json(jwt))
        }
        Err(e) => {
            debug!("login: authentication failed for '{}': {}", email, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Auth",
    request_body = SignupReq,
    responses(
        (status = 200, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Invalid payload or email already taken", body = MessageResponse)
    ),
    summary = "Register a new user account"
)]
#[post("/register")]
pub(super) async fn register(
    accounts: web::Data<AccountService>,
    req_body: web::Json<SignupReq>,
) -> Result<HttpResponse, ApiError> {
    let email = req_body.email.clone();
    let accounts = accounts.into_inner();
    match web::block(move || accounts.register(req_body.into_inner())).await? {
        Ok(user) => {
            debug!("register: created account {} for '{}'", user.id, email);
            Ok(HttpResponse::Ok().json(MessageResponse::new("User registered successfully!")))
        }
        Err(e) => {
            error!("register: failed to create account for '{}': {}", email, e);
            Err(e.into())
        }
    }
}
