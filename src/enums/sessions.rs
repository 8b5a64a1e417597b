use crate::models::session::{SessionFields, SessionWithRoster};
use crate::validation::Violations;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Body of session create and update. The roster is not writable through it; clients use
/// the participate endpoints.
#[derive(Deserialize, ToSchema, Debug)]
pub struct SessionReq {
    #[serde(default)]
    pub name: String,
    /// RFC 3339 date-time, or a plain `YYYY-MM-DD` date taken as midnight UTC.
    #[serde(default, deserialize_with = "session_date")]
    pub date: Option<DateTime<Utc>>,
    pub teacher_id: Option<i64>,
    pub description: Option<String>,
}

fn session_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_session_date(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'")))
}

fn parse_session_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

impl SessionReq {
    pub fn into_fields(self) -> Result<SessionFields, Vec<String>> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name)
            .size("name", &self.name, 0, 50)
            .required("date", &self.date)
            .required("teacher_id", &self.teacher_id)
            .required("description", &self.description);
        if let Some(description) = &self.description {
            v.size("description", description, 0, 2500);
        }
        v.into_result()?;

        match (self.date, self.description) {
            (Some(date), Some(description)) => Ok(SessionFields {
                name: self.name,
                description,
                date,
                teacher_id: self.teacher_id,
            }),
            _ => Err(vec!["date and description are required".to_string()]),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "teacher_id")]
    pub teacher_id: Option<i64>,
    pub description: String,
    pub users: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionWithRoster> for SessionDto {
    fn from(value: SessionWithRoster) -> Self {
        let session = value.session;
        Self {
            id: session.id,
            name: session.name,
            date: session.date,
            teacher_id: session.teacher_id,
            description: session.description,
            users: value.users,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}
