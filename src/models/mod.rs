pub mod session;
pub mod teacher;
pub mod user;
