use crate::db::errors::RepositoryError;
use crate::db::{DbConnection, DbPool};
use crate::models::user::{NewUser, User};
use crate::traits::UserLookup;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error};
use log::{debug, error};

#[derive(Clone)]
pub struct UserOperations {
    pool: DbPool,
}

impl UserOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account. The email must not be in use yet; the unique index backs
    /// up the explicit check when two registrations race.
    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        conn.connection().transaction(|conn| {
            let taken = diesel::select(diesel::dsl::exists(
                users.filter(email.eq(&new_user.email)),
            ))
            .get_result::<bool>(conn)?;
            if taken {
                return Err(RepositoryError::EmailAlreadyTaken(new_user.email.clone()));
            }

            diesel::insert_into(users)
                .values(&new_user)
                .returning(User::as_returning())
                .get_result(conn)
                .map_err(|e| match e {
                    Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::EmailAlreadyTaken(new_user.email.clone())
                    }
                    other => {
                        error!(
                            "create_user: error inserting new user with email '{}': {}",
                            new_user.email, other
                        );
                        RepositoryError::DatabaseError(other)
                    }
                })
        })
    }

    pub fn exists_by_email(&self, email_addr: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(email_addr))))
            .get_result::<bool>(conn.connection())
            .map_err(|e| {
                error!("exists_by_email: error checking email '{}': {}", email_addr, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_user_by_id(&self, search_id: i64) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user_by_id: failed to acquire DB connection for id {}: {}",
                search_id, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .find(search_id)
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("user {search_id}")),
                other => {
                    error!("get_user_by_id: error fetching user {}: {}", search_id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn get_user_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .filter(email.eq(email_addr))
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(email_addr.to_string()),
                other => {
                    error!(
                        "get_user_by_email: error fetching user with email '{}': {}",
                        email_addr, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    /// Removes the account and, through the foreign key, its roster entries.
    pub fn delete_user(&self, delete_id: i64) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("delete_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;
        let deleted = diesel::delete(users.find(delete_id))
            .execute(conn.connection())
            .map_err(|e| {
                error!("delete_user: error deleting user {}: {}", delete_id, e);
                RepositoryError::DatabaseError(e)
            })?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(format!("user {delete_id}")));
        }
        debug!("delete_user: removed user {}", delete_id);
        Ok(())
    }

    /// Creates `admin_user` unless its email is already registered. Returns whether a row
    /// was inserted.
    pub fn ensure_admin(&self, admin_user: NewUser) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        let inserted = diesel::insert_into(users)
            .values(&admin_user)
            .on_conflict(email)
            .do_nothing()
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "ensure_admin: error inserting admin '{}': {}",
                    admin_user.email, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        Ok(inserted > 0)
    }
}

impl UserLookup for UserOperations {
    fn find_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        self.get_user_by_email(email_addr)
    }
}
