use crate::models::user::User;

/// The authenticated identity of one request, rebuilt from the stored user every time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            admin: user.admin,
        }
    }
}

impl Principal {
    /// Whether this principal owns the account registered under `email`.
    pub fn owns(&self, email: &str) -> bool {
        self.email == email
    }
}
