use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};

use crate::models::teacher::Teacher;
use crate::models::user::User;

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::db::schema::sessions)]
#[diesel(belongs_to(Teacher, foreign_key = teacher_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub teacher_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written by both create and update. The roster is managed separately.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::db::schema::sessions)]
#[diesel(treat_none_as_null = true)]
pub struct SessionFields {
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub teacher_id: Option<i64>,
}

/// One roster entry.
#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone, Copy, PartialEq)]
#[diesel(table_name = crate::db::schema::participate)]
#[diesel(primary_key(session_id, user_id))]
#[diesel(belongs_to(Session, foreign_key = session_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Participation {
    pub session_id: i64,
    pub user_id: i64,
}

/// A session together with the ids of its participants.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionWithRoster {
    pub session: Session,
    pub users: Vec<i64>,
}

impl SessionWithRoster {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.users.contains(&user_id)
    }
}
