use crate::auth::config::JwtConfig;
use crate::auth::principal::Principal;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error("malformed token")]
    MalformedToken,
    #[error("token lifetime overflows the clock")]
    ExpiryOverflow,
    #[error("signing error: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // email
    iat: u64,
    exp: u64,
}

/// Issues and validates HS512 bearer tokens. Holds no state besides the keys, so clones
/// are cheap to hand to every worker.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_secs: u64,
}

impl TokenService {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            expiry_secs: cfg.expiry_secs,
        }
    }

    pub fn expiry_secs(&self) -> u64 {
        self.expiry_secs
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        self.issue_at(&principal.email, jsonwebtoken::get_current_timestamp())
    }

    /// Issues a token for `subject` as if it had been created at `issued_at` (unix seconds).
    pub fn issue_at(&self, subject: &str, issued_at: u64) -> Result<String, TokenError> {
        let exp = issued_at
            .checked_add(self.expiry_secs)
            .ok_or(TokenError::ExpiryOverflow)?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at,
            exp,
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Checks signature and expiry and returns the subject.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::MalformedToken,
                _ => TokenError::InvalidToken,
            }
        })?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&JwtConfig {
            secret: secret.to_string(),
            expiry_secs: 60,
        })
    }

    fn principal() -> Principal {
        Principal {
            id: 7,
            email: "yoga@studio.com".to_string(),
            first_name: "Admin".to_string(),
            last_name: "Admin".to_string(),
            admin: true,
        }
    }

    #[test]
    fn issued_token_resolves_to_subject() {
        let tokens = service("test-secret");
        let token = tokens.issue(&principal()).expect("issue");
        assert_eq!(tokens.validate(&token), Ok("yoga@studio.com".to_string()));
    }

    #[test]
    fn token_past_expiry_is_rejected() {
        let tokens = service("test-secret");
        let issued = jsonwebtoken::get_current_timestamp() - 600;
        let token = tokens.issue_at("yoga@studio.com", issued).expect("issue");
        assert_eq!(tokens.validate(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = service("other-secret").issue(&principal()).expect("issue");
        assert_eq!(
            service("test-secret").validate(&token),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn overflowing_lifetime_is_an_error() {
        let tokens = TokenService::new(&JwtConfig {
            secret: "test-secret".to_string(),
            expiry_secs: u64::MAX,
        });
        assert_eq!(
            tokens.issue_at("yoga@studio.com", jsonwebtoken::get_current_timestamp()),
            Err(TokenError::ExpiryOverflow)
        );
        assert_eq!(tokens.issue(&principal()), Err(TokenError::ExpiryOverflow));
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = service("test-secret");
        assert_eq!(tokens.validate("not-a-jwt"), Err(TokenError::MalformedToken));
        assert_eq!(tokens.validate("a.b.c"), Err(TokenError::MalformedToken));
    }

    #[test]
    fn other_algorithm_is_invalid() {
        let claims = serde_json::json!({
            "sub": "yoga@studio.com",
            "iat": jsonwebtoken::get_current_timestamp(),
            "exp": jsonwebtoken::get_current_timestamp() + 60,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        assert_eq!(
            service("test-secret").validate(&token),
            Err(TokenError::InvalidToken)
        );
    }
}
