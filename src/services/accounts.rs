use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::{Principal, TokenError, TokenService};
use crate::config::AdminBootstrap;
use crate::db::{RepositoryError, UserOperations};
use crate::enums::auth::{JwtResp, LoginReq, SignupReq};
use crate::models::user::{NewUser, User};
use log::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("Email is already taken!")]
    EmailAlreadyTaken,
    #[error("Bad credentials")]
    BadCredentials,
    #[error("Unauthorized")]
    NotOwner,
    #[error(transparent)]
    Repository(RepositoryError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<RepositoryError> for AccountError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::EmailAlreadyTaken(_) => AccountError::EmailAlreadyTaken,
            other => AccountError::Repository(other),
        }
    }
}

/// Registration, login and self-service deletion on top of [`UserOperations`].
#[derive(Clone)]
pub struct AccountService {
    user_ops: UserOperations,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(user_ops: UserOperations, tokens: TokenService) -> Self {
        Self { user_ops, tokens }
    }

    pub fn register(&self, req: SignupReq) -> Result<User, AccountError> {
        req.validate().map_err(AccountError::Invalid)?;

        if self.user_ops.exists_by_email(&req.email)? {
            debug!("register: email '{}' already registered", req.email);
            return Err(AccountError::EmailAlreadyTaken);
        }

        let user = self.user_ops.create_user(NewUser {
            email: req.email,
            last_name: req.last_name,
            first_name: req.first_name,
            password_hash: hash_password(&req.password)?,
            admin: false,
        })?;
        info!("register: created user {} '{}'", user.id, user.email);
        Ok(user)
    }

    /// Checks the credentials and issues a token for the account.
    pub fn login(&self, req: LoginReq) -> Result<JwtResp, AccountError> {
        req.validate().map_err(AccountError::Invalid)?;

        let user = match self.user_ops.get_user_by_email(&req.email) {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => return Err(AccountError::BadCredentials),
            Err(e) => return Err(e.into()),
        };
        if !verify_password(&req.password, &user.password_hash) {
            return Err(AccountError::BadCredentials);
        }

        let principal = Principal::from(&user);
        let token = self.tokens.issue(&principal)?;
        Ok(JwtResp::new(token, principal))
    }

    /// Deletes account `id`, which must belong to `principal`.
    pub fn delete_account(&self, id: i64, principal: &Principal) -> Result<(), AccountError> {
        let user = self.user_ops.get_user_by_id(id)?;
        if !principal.owns(&user.email) {
            warn!(
                "delete_account: {} tried to delete account {}",
                principal.email, user.id
            );
            return Err(AccountError::NotOwner);
        }
        self.user_ops.delete_user(user.id)?;
        Ok(())
    }

    pub fn ensure_admin(&self, admin: &AdminBootstrap) -> Result<bool, AccountError> {
        let created = self.user_ops.ensure_admin(NewUser {
            email: admin.email.clone(),
            last_name: admin.last_name.clone(),
            first_name: admin.first_name.clone(),
            password_hash: hash_password(&admin.password)?,
            admin: true,
        })?;
        if created {
            info!("ensure_admin: created admin account '{}'", admin.email);
        }
        Ok(created)
    }
}
