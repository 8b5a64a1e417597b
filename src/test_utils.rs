use crate::auth::password::hash_password;
use crate::auth::JwtConfig;
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, DbPool, RepositoryError};
use crate::models::session::{Participation, SessionFields};
use crate::models::teacher::NewTeacher;
use crate::models::user::NewUser;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel::PgConnection;

// Fixture strategy:
// - Every fixture user shares TEST_PASSWORD so login tests can use it directly.
// - Tokens are signed with TEST_JWT_SECRET; no environment variables are touched.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry_secs: 60 * 60,
    }
}

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url, 5).expect("Unable to build pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query("TRUNCATE TABLE participate, sessions, users, teachers RESTART IDENTITY CASCADE")
        .execute(conn.connection())
        .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    /// Owner of `user_email`, not on any roster.
    pub user_id: i64,
    pub user_email: String,
    /// A second account, also not on any roster.
    pub other_user_id: i64,
    pub other_user_email: String,
    pub teacher_id: i64,
    pub session_id: i64,
}

pub fn seed_basic_fixtures(pool: &DbPool) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let user_email = "john.doe@example.com".to_string();
    let other_user_email = "lorem.ipsum@example.com".to_string();
    let user_id = insert_user(conn.connection(), &user_email, "John", "Doe", false)?;
    let other_user_id = insert_user(conn.connection(), &other_user_email, "Lorem", "Ipsum", true)?;
    let teacher_id = insert_teacher(conn.connection(), "Margot", "DELAHAYE")?;
    let session_id = insert_session(
        conn.connection(),
        "Yoga Session",
        "A relaxing yoga session",
        Some(teacher_id),
    )?;

    Ok(TestFixtures {
        user_id,
        user_email,
        other_user_id,
        other_user_email,
        teacher_id,
        session_id,
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    email_val: &str,
    first_name_val: &str,
    last_name_val: &str,
    admin_val: bool,
) -> Result<i64, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    let new_user = NewUser {
        email: email_val.to_string(),
        last_name: last_name_val.to_string(),
        first_name: first_name_val.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("Unable to hash fixture password"),
        admin: admin_val,
    };

    diesel::insert_into(users)
        .values(&new_user)
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_teacher(
    conn: &mut PgConnection,
    first_name_val: &str,
    last_name_val: &str,
) -> Result<i64, RepositoryError> {
    use crate::db::schema::teachers::dsl::*;

    diesel::insert_into(teachers)
        .values(&NewTeacher {
            last_name: last_name_val.to_string(),
            first_name: first_name_val.to_string(),
        })
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_session(
    conn: &mut PgConnection,
    name_val: &str,
    description_val: &str,
    teacher_id_val: Option<i64>,
) -> Result<i64, RepositoryError> {
    use crate::db::schema::sessions::dsl::*;

    diesel::insert_into(sessions)
        .values(&SessionFields {
            name: name_val.to_string(),
            description: description_val.to_string(),
            date: Utc::now() + Duration::days(7),
            teacher_id: teacher_id_val,
        })
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn roster_of(conn: &mut PgConnection, session_id_val: i64) -> Result<Vec<i64>, RepositoryError> {
    use crate::db::schema::participate::dsl::*;

    participate
        .filter(session_id.eq(session_id_val))
        .select(Participation::as_select())
        .order(user_id.asc())
        .load::<Participation>(conn)
        .map(|rows| rows.into_iter().map(|p| p.user_id).collect())
        .map_err(RepositoryError::DatabaseError)
}
