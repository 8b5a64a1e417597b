use crate::db::errors::RepositoryError;
use crate::db::{DbConnection, DbPool};
use crate::models::teacher::Teacher;
use diesel::prelude::*;
use diesel::result::Error;
use log::error;

#[derive(Clone)]
pub struct TeacherOperations {
    pool: DbPool,
}

impl TeacherOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_all_teachers(&self) -> Result<Vec<Teacher>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_teachers: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::teachers::dsl::*;
        teachers
            .order(id.asc())
            .select(Teacher::as_select())
            .load::<Teacher>(conn.connection())
            .map_err(|e| {
                error!("get_all_teachers: error fetching teachers: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_teacher(&self, search_id: i64) -> Result<Teacher, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_teacher: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::teachers::dsl::*;
        teachers
            .find(search_id)
            .select(Teacher::as_select())
            .first::<Teacher>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("teacher {search_id}")),
                other => {
                    error!("get_teacher: error fetching teacher {}: {}", search_id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }
}
