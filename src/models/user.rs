use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};

/// A stored account. Never serialized directly: the password hash stays inside the crate
/// boundary and callers go through [`crate::enums::users::UserDto`].
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub password_hash: String,
    pub admin: bool,
}
