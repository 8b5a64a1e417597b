use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse, ResponseError};

use crate::db::RepositoryError;
use crate::enums::common::MessageResponse;
use crate::services::AccountError;

/// Errors surfaced by handlers, each mapped to one status code and a short message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    MalformedInput(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(_) => ApiError::NotFound(e.to_string()),
            RepositoryError::EmailAlreadyTaken(_)
            | RepositoryError::AlreadyParticipating { .. }
            | RepositoryError::NotParticipating { .. } => ApiError::BadRequest(e.to_string()),
            RepositoryError::DatabaseError(_)
            | RepositoryError::ConnectionPoolError(_)
            | RepositoryError::MigrationError(_) => {
                error!("repository failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::Invalid(_) => ApiError::MalformedInput(e.to_string()),
            AccountError::EmailAlreadyTaken => ApiError::BadRequest(e.to_string()),
            AccountError::BadCredentials | AccountError::NotOwner => {
                ApiError::Unauthenticated(e.to_string())
            }
            AccountError::Repository(inner) => inner.into(),
            AccountError::Password(_) | AccountError::Token(_) => {
                error!("account failure: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(e: BlockingError) -> Self {
        error!("blocking task failed: {}", e);
        ApiError::Internal
    }
}

/// Path ids arrive as text so that a non-numeric id is a 400 rather than a routing miss.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::MalformedInput(format!("Invalid id: '{raw}'")))
}

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    ApiError::MalformedInput(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_id_is_malformed() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("invalid"), Err(ApiError::MalformedInput(_))));
        assert!(matches!(parse_id(""), Err(ApiError::MalformedInput(_))));
    }

    #[test]
    fn repository_errors_map_to_statuses() {
        let cases = [
            (RepositoryError::NotFound("session 9".into()), StatusCode::NOT_FOUND),
            (
                RepositoryError::EmailAlreadyTaken("a@b.c".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::AlreadyParticipating {
                    session_id: 1,
                    user_id: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::NotParticipating {
                    session_id: 1,
                    user_id: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::MigrationError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn account_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(AccountError::EmailAlreadyTaken).to_string(),
            "Email is already taken!"
        );
        assert_eq!(
            ApiError::from(AccountError::BadCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AccountError::NotOwner).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AccountError::Invalid(vec!["email: must not be blank".into()]))
                .status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
