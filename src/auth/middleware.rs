use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http::header, web, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::jwt::{TokenError, TokenService};
use crate::auth::Principal;
use crate::db::RepositoryError;
use crate::traits::UserLookup;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token rejected: {0}")]
    Token(#[from] TokenError),
    #[error("User Not Found with email: {0}")]
    UserNotFound(String),
    #[error("user lookup failed: {0}")]
    Lookup(RepositoryError),
}

/// Returns the token of a well-formed `Bearer <token>` header value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the principal of one request.
///
/// `Ok(None)` means there was no usable bearer header and the request carries on
/// anonymously. Errors are never fatal either: the caller logs them and also carries on
/// without a principal, leaving rejection to the handlers that need one.
pub fn authenticate(
    authorization: Option<&str>,
    tokens: &TokenService,
    users: &dyn UserLookup,
) -> Result<Option<Principal>, AuthError> {
    let Some(token) = authorization.and_then(bearer_token) else {
        return Ok(None);
    };

    let subject = tokens.validate(token)?;
    let user = users.find_by_email(&subject).map_err(|e| match e {
        RepositoryError::NotFound(_) => AuthError::UserNotFound(subject.clone()),
        other => AuthError::Lookup(other),
    })?;
    Ok(Some(Principal::from(&user)))
}

#[derive(Clone)]
pub struct AuthLayer {
    tokens: TokenService,
    users: Arc<dyn UserLookup>,
}

impl AuthLayer {
    pub fn new(tokens: TokenService, users: Arc<dyn UserLookup>) -> Self {
        Self { tokens, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| bearer_token(v).is_some())
            .map(|s| s.to_string());

        let srv = self.service.clone();
        let Some(authorization) = authorization else {
            return Box::pin(async move { srv.call(req).await });
        };

        let tokens = self.inner.tokens.clone();
        let users = self.inner.users.clone();
        Box::pin(async move {
            let path = req.path().to_string();
            let outcome =
                web::block(move || authenticate(Some(&authorization), &tokens, users.as_ref()))
                    .await;

            match outcome {
                Ok(Ok(Some(principal))) => {
                    debug!("auth: {} authenticated for {}", principal.email, path);
                    req.extensions_mut().insert(principal);
                }
                Ok(Ok(None)) => {}
                Ok(Err(AuthError::Lookup(e))) => {
                    error!("auth: user lookup failed for {}: {}", path, e);
                }
                Ok(Err(e)) => {
                    debug!("auth: continuing unauthenticated for {}: {}", path, e);
                }
                Err(e) => {
                    error!("auth: blocking task failed for {}: {}", path, e);
                }
            }

            srv.call(req).await
        })
    }
}
