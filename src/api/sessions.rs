use crate::api::{parse_id, ApiError};
use crate::auth::{AuthLayer, AuthenticatedUser};
use crate::db::SessionOperations;
use crate::enums::sessions::{SessionDto, SessionReq};
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{debug, error, info};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub(super) fn config(cfg: &mut ServiceConfig, session_ops: &SessionOperations, auth: &AuthLayer) {
    cfg.service(
        scope::scope("/api/session")
            .wrap(auth.clone())
            .app_data(web::Data::new(session_ops.clone()))
            .service(find_all_sessions)
            .service(find_session_by_id)
            .service(create_session)
            .service(update_session)
            .service(delete_session)
            .service(participate)
            .service(no_longer_participate),
    );
}

#[utoipa::path(
    tag = "Session",
    responses(
        (status = 200, description = "All sessions with their rosters", body = Vec<SessionDto>),
        (status = 401, description = "Not authenticated")
    ),
    summary = "List sessions"
)]
#[get("")]
pub(super) async fn find_all_sessions(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
) -> Result<HttpResponse, ApiError> {
    match session_ops.get_all_sessions() {
        Ok(sessions) => {
            debug!("find_all_sessions: fetched {} sessions", sessions.len());
            let data: Vec<SessionDto> = sessions.into_iter().map(Into::into).collect();
            Ok(HttpResponse::Ok().json(data))
        }
        Err(e) => {
            error!("find_all_sessions: failed to retrieve sessions: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "The session", body = SessionDto),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "No such session")
    ),
    summary = "Get one session"
)]
#[get("/{id}")]
pub(super) async fn find_session_by_id(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session_id = parse_id(&path)?;
    let session = session_ops.get_session(session_id)?;
    Ok(HttpResponse::Ok().json(SessionDto::from(session)))
}

#[utoipa::path(
    tag = "Session",
    request_body = SessionReq,
    responses(
        (status = 200, description = "Session created", body = SessionDto),
        (status = 400, description = "Invalid session payload"),
        (status = 404, description = "Referenced teacher does not exist")
    ),
    summary = "Create a session"
)]
#[post("")]
pub(super) async fn create_session(
    user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    req_body: web::Json<SessionReq>,
) -> Result<HttpResponse, ApiError> {
    let fields = req_body
        .into_inner()
        .into_fields()
        .map_err(|violations| ApiError::MalformedInput(violations.join("; ")))?;

    match session_ops.create_session(fields) {
        Ok(session) => {
            info!(
                "create_session: {} created session {}",
                user.principal().email,
                session.session.id
            );
            Ok(HttpResponse::Ok().json(SessionDto::from(session)))
        }
        Err(e) => {
            error!("create_session: failed to create session: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Session",
    params(("id" = String, Path, description = "Session id")),
    request_body = SessionReq,
    responses(
        (status = 200, description = "Session updated", body = SessionDto),
        (status = 400, description = "Id is not a number or invalid payload"),
        (status = 404, description = "No such session or teacher")
    ),
    summary = "Update a session"
)]
#[put("/{id}")]
pub(super) async fn update_session(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    path: web::Path<String>,
    req_body: web::Json<SessionReq>,
) -> Result<HttpResponse, ApiError> {
    let session_id = parse_id(&path)?;
    let fields = req_body
        .into_inner()
        .into_fields()
        .map_err(|violations| ApiError::MalformedInput(violations.join("; ")))?;

    let session = session_ops.update_session(session_id, fields)?;
    debug!("update_session: updated session {}", session_id);
    Ok(HttpResponse::Ok().json(SessionDto::from(session)))
}

#[utoipa::path(
    tag = "Session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "No such session")
    ),
    summary = "Delete a session"
)]
#[delete("/{id}")]
pub(super) async fn delete_session(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session_id = parse_id(&path)?;
    session_ops.delete_session(session_id)?;
    debug!("delete_session: deleted session {}", session_id);
    Ok(HttpResponse::Ok().finish())
}

#[utoipa::path(
    tag = "Session",
    params(
        ("id" = String, Path, description = "Session id"),
        ("user_id" = String, Path, description = "User joining the session")
    ),
    responses(
        (status = 200, description = "User added to the roster"),
        (status = 400, description = "Malformed id or user already participates"),
        (status = 404, description = "No such session or user")
    ),
    summary = "Join a session"
)]
#[post("/{id}/participate/{user_id}")]
pub(super) async fn participate(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (raw_session, raw_user) = path.into_inner();
    let session_id = parse_id(&raw_session)?;
    let user_id = parse_id(&raw_user)?;

    match session_ops.participate(session_id, user_id) {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(e) => {
            debug!(
                "participate: user {} could not join session {}: {}",
                user_id, session_id, e
            );
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Session",
    params(
        ("id" = String, Path, description = "Session id"),
        ("user_id" = String, Path, description = "User leaving the session")
    ),
    responses(
        (status = 200, description = "User removed from the roster"),
        (status = 400, description = "Malformed id or user does not participate"),
        (status = 404, description = "No such session")
    ),
    summary = "Leave a session"
)]
#[delete("/{id}/participate/{user_id}")]
pub(super) async fn no_longer_participate(
    _user: AuthenticatedUser,
    session_ops: web::Data<SessionOperations>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (raw_session, raw_user) = path.into_inner();
    let session_id = parse_id(&raw_session)?;
    let user_id = parse_id(&raw_user)?;

    match session_ops.no_longer_participate(session_id, user_id) {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(e) => {
            debug!(
                "no_longer_participate: user {} could not leave session {}: {}",
                user_id, session_id, e
            );
            Err(e.into())
        }
    }
}
