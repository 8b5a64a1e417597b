use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Email is already taken!")]
    EmailAlreadyTaken(String),
    #[error("User {user_id} already participates in session {session_id}")]
    AlreadyParticipating { session_id: i64, user_id: i64 },
    #[error("User {user_id} does not participate in session {session_id}")]
    NotParticipating { session_id: i64, user_id: i64 },
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Migration error: {0}")]
    MigrationError(String),
}
