use crate::api::{parse_id, ApiError};
use crate::auth::{AuthLayer, AuthenticatedUser};
use crate::db::UserOperations;
use crate::enums::users::UserDto;
use crate::services::AccountService;
use actix_web::{delete, get, web, HttpResponse};
use log::{debug, error};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub(super) fn config(
    cfg: &mut ServiceConfig,
    user_ops: &UserOperations,
    accounts: &AccountService,
    auth: &AuthLayer,
) {
    cfg.service(
        scope::scope("/api/user")
            .wrap(auth.clone())
            .app_data(web::Data::new(user_ops.clone()))
            .app_data(web::Data::new(accounts.clone()))
            .service(find_user_by_id)
            .service(delete_user),
    );
}

#[utoipa::path(
    tag = "User",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, without credentials", body = UserDto),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "No such user")
    ),
    summary = "Get one user"
)]
#[get("/{id}")]
pub(super) async fn find_user_by_id(
    _user: AuthenticatedUser,
    user_ops: web::Data<UserOperations>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let search_id = parse_id(&path)?;
    let user = user_ops.get_user_by_id(search_id)?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[utoipa::path(
    tag = "User",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Id is not a number"),
        (status = 401, description = "Account belongs to someone else"),
        (status = 404, description = "No such user")
    ),
    summary = "Delete your own account"
)]
#[delete("/{id}")]
pub(super) async fn delete_user(
    user: AuthenticatedUser,
    accounts: web::Data<AccountService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let delete_id = parse_id(&path)?;
    let principal = user.0;
    match accounts.delete_account(delete_id, &principal) {
        Ok(()) => {
            debug!("delete_user: {} deleted account {}", principal.email, delete_id);
            Ok(HttpResponse::Ok().finish())
        }
        Err(e) => {
            error!("delete_user: could not delete account {}: {}", delete_id, e);
            Err(e.into())
        }
    }
}
