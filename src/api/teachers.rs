use crate::api::{parse_id, ApiError};
use crate::auth::{AuthLayer, AuthenticatedUser};
use crate::db::TeacherOperations;
use crate::models::teacher::Teacher;
use actix_web::{get, web, HttpResponse};
use log::{debug, error};
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub(super) fn config(cfg: &mut ServiceConfig, teacher_ops: &TeacherOperations, auth: &AuthLayer) {
    cfg.service(
        scope::scope("/api/teacher")
            .wrap(auth.clone())
            .app_data(web::Data::new(teacher_ops.clone()))
            .service(find_all_teachers)
            .service(find_teacher_by_id),
    );
}

#[utoipa::path(
    tag = "Teacher",
    responses(
        (status = 200, description = "All teachers", body = Vec<Teacher>),
        (status = 401, description = "Not authenticated")
    ),
    summary = "List teachers"
)]
#[get("")]
pub(super) async fn find_all_teachers(
    _user: AuthenticatedUser,
    teacher_ops: web::Data<TeacherOperations>,
) -> Result<HttpResponse, ApiError> {
    match teacher_ops.get_all_teachers() {
        Ok(data) => {
            debug!("find_all_teachers: fetched {} teachers", data.len());
            Ok(HttpResponse::Ok().json(data))
        }
        Err(e) => {
            error!("find_all_teachers: failed to retrieve teachers: {}", e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    tag = "Teacher",
    params(("id" = String, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "The teacher", body = Teacher),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "No such teacher")
    ),
    summary = "Get one teacher"
)]
#[get("/{id}")]
pub(super) async fn find_teacher_by_id(
    _user: AuthenticatedUser,
    teacher_ops: web::Data<TeacherOperations>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let teacher_id = parse_id(&path)?;
    let teacher = teacher_ops.get_teacher(teacher_id)?;
    Ok(HttpResponse::Ok().json(teacher))
}
