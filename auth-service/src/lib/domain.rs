pub mod authentication;
pub mod token;
pub mod user;
