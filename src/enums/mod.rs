pub mod auth;
pub mod common;
pub mod sessions;
pub mod users;
