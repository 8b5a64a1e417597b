pub mod config;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod principal;

pub use config::JwtConfig;
pub use extractors::AuthenticatedUser;
pub use jwt::{TokenError, TokenService};
pub use middleware::AuthLayer;
pub use principal::Principal;
