use crate::db::errors::RepositoryError;
use crate::db::{DbConnection, DbPool};
use crate::models::session::{Participation, Session, SessionFields, SessionWithRoster};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::PgConnection;
use log::{debug, error, info};

#[derive(Clone)]
pub struct SessionOperations {
    pool: DbPool,
}

impl SessionOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_all_sessions(&self) -> Result<Vec<SessionWithRoster>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_sessions: failed to acquire DB connection: {}", e);
            e
        })?;
        let conn = conn.connection();

        use crate::db::schema::sessions::dsl::*;
        let all_sessions = sessions
            .order(id.asc())
            .select(Session::as_select())
            .load::<Session>(conn)
            .map_err(|e| {
                error!("get_all_sessions: error fetching sessions: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let rosters = Participation::belonging_to(&all_sessions)
            .select(Participation::as_select())
            .load::<Participation>(conn)
            .map_err(|e| {
                error!("get_all_sessions: error fetching rosters: {}", e);
                RepositoryError::DatabaseError(e)
            })?
            .grouped_by(&all_sessions);

        Ok(all_sessions
            .into_iter()
            .zip(rosters)
            .map(|(session, roster)| SessionWithRoster {
                session,
                users: roster.into_iter().map(|p| p.user_id).collect(),
            })
            .collect())
    }

    pub fn get_session(&self, search_id: i64) -> Result<SessionWithRoster, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_session: failed to acquire DB connection: {}", e);
            e
        })?;
        let conn = conn.connection();

        let session = find_session(conn, search_id, false)?;
        let users = load_roster(conn, &session)?;
        Ok(SessionWithRoster { session, users })
    }

    pub fn create_session(&self, fields: SessionFields) -> Result<SessionWithRoster, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_session: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            ensure_teacher_exists(conn, fields.teacher_id)?;

            use crate::db::schema::sessions::dsl::*;
            let session = diesel::insert_into(sessions)
                .values(&fields)
                .returning(Session::as_returning())
                .get_result::<Session>(conn)
                .map_err(|e| {
                    error!("create_session: error inserting session '{}': {}", fields.name, e);
                    RepositoryError::DatabaseError(e)
                })?;

            info!("create_session: created session {} '{}'", session.id, session.name);
            Ok(SessionWithRoster {
                session,
                users: Vec::new(),
            })
        })
    }

    pub fn update_session(
        &self,
        update_id: i64,
        fields: SessionFields,
    ) -> Result<SessionWithRoster, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_session: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            find_session(conn, update_id, true)?;
            ensure_teacher_exists(conn, fields.teacher_id)?;

            use crate::db::schema::sessions::dsl::*;
            let session = diesel::update(sessions.find(update_id))
                .set((&fields, updated_at.eq(Utc::now())))
                .returning(Session::as_returning())
                .get_result::<Session>(conn)
                .map_err(|e| {
                    error!("update_session: error updating session {}: {}", update_id, e);
                    RepositoryError::DatabaseError(e)
                })?;

            let users = load_roster(conn, &session)?;
            Ok(SessionWithRoster { session, users })
        })
    }

    pub fn delete_session(&self, delete_id: i64) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("delete_session: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::sessions::dsl::*;
        let deleted = diesel::delete(sessions.find(delete_id))
            .execute(conn.connection())
            .map_err(|e| {
                error!("delete_session: error deleting session {}: {}", delete_id, e);
                RepositoryError::DatabaseError(e)
            })?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(format!("session {delete_id}")));
        }
        Ok(())
    }

    /// Adds `participant_id` to the roster of `target_session`.
    ///
    /// The session row is locked for the duration of the transaction, so concurrent roster
    /// changes on one session apply one after the other.
    pub fn participate(&self, target_session: i64, participant_id: i64) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("participate: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            find_session(conn, target_session, true)?;

            {
                use crate::db::schema::users::dsl::*;
                let user_exists = diesel::select(diesel::dsl::exists(users.find(participant_id)))
                    .get_result::<bool>(conn)?;
                if !user_exists {
                    return Err(RepositoryError::NotFound(format!("user {participant_id}")));
                }
            }

            use crate::db::schema::participate::dsl::*;
            let inserted = diesel::insert_into(participate)
                .values(&Participation {
                    session_id: target_session,
                    user_id: participant_id,
                })
                .on_conflict_do_nothing()
                .execute(conn)
                .map_err(|e| roster_insert_error(e, target_session, participant_id))?;

            if inserted == 0 {
                return Err(RepositoryError::AlreadyParticipating {
                    session_id: target_session,
                    user_id: participant_id,
                });
            }
            debug!("participate: user {} joined session {}", participant_id, target_session);
            Ok(())
        })
    }

    /// Removes `participant_id` from the roster of `target_session`.
    pub fn no_longer_participate(
        &self,
        target_session: i64,
        participant_id: i64,
    ) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("no_longer_participate: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            find_session(conn, target_session, true)?;

            use crate::db::schema::participate::dsl::*;
            let removed = diesel::delete(
                participate
                    .filter(session_id.eq(target_session))
                    .filter(user_id.eq(participant_id)),
            )
            .execute(conn)
            .map_err(|e| {
                error!(
                    "no_longer_participate: error removing user {} from session {}: {}",
                    participant_id, target_session, e
                );
                RepositoryError::DatabaseError(e)
            })?;

            if removed == 0 {
                return Err(RepositoryError::NotParticipating {
                    session_id: target_session,
                    user_id: participant_id,
                });
            }
            debug!("no_longer_participate: user {} left session {}", participant_id, target_session);
            Ok(())
        })
    }
}

fn find_session(conn: &mut PgConnection, search_id: i64, lock: bool) -> Result<Session, RepositoryError> {
    use crate::db::schema::sessions::dsl::*;

    let query = sessions.find(search_id).select(Session::as_select());
    let result = if lock {
        query.for_update().get_result::<Session>(conn)
    } else {
        query.get_result::<Session>(conn)
    };

    result.map_err(|e| match e {
        Error::NotFound => RepositoryError::NotFound(format!("session {search_id}")),
        other => {
            error!("find_session: error fetching session {}: {}", search_id, other);
            RepositoryError::DatabaseError(other)
        }
    })
}

/// The user row can disappear between the existence check and the insert; the foreign key
/// then reports what the check would have.
fn roster_insert_error(e: Error, target_session: i64, participant_id: i64) -> RepositoryError {
    match e {
        Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            RepositoryError::NotFound(format!("user {participant_id}"))
        }
        other => {
            error!(
                "participate: error adding user {} to session {}: {}",
                participant_id, target_session, other
            );
            RepositoryError::DatabaseError(other)
        }
    }
}

fn load_roster(conn: &mut PgConnection, session: &Session) -> Result<Vec<i64>, RepositoryError> {
    use crate::db::schema::participate::dsl::*;

    Participation::belonging_to(session)
        .select(user_id)
        .order(user_id.asc())
        .load::<i64>(conn)
        .map_err(|e| {
            error!("load_roster: error fetching roster of session {}: {}", session.id, e);
            RepositoryError::DatabaseError(e)
        })
}

fn ensure_teacher_exists(conn: &mut PgConnection, teacher: Option<i64>) -> Result<(), RepositoryError> {
    let Some(search_id) = teacher else {
        return Ok(());
    };

    use crate::db::schema::teachers::dsl::*;
    let found = diesel::select(diesel::dsl::exists(teachers.find(search_id))).get_result::<bool>(conn)?;
    if found {
        Ok(())
    } else {
        Err(RepositoryError::NotFound(format!("teacher {search_id}")))
    }
}
