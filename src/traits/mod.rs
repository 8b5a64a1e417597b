use crate::db::RepositoryError;
use crate::models::user::User;

/// Account lookup used by the request authenticator to turn a token subject back into a
/// user. Implemented by [`crate::db::UserOperations`].
pub trait UserLookup: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}
