use crate::api::ApiError;
use crate::auth::principal::Principal;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

/// The principal attached by [`crate::auth::AuthLayer`]. Handlers that take this argument
/// answer 401 when the request was not authenticated.
pub struct AuthenticatedUser(pub Principal);

impl AuthenticatedUser {
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            return ready(Ok(AuthenticatedUser(p.clone())));
        }
        ready(Err(ApiError::Unauthenticated("Unauthorized".to_string()).into()))
    }
}
