use thiserror::Error;

use crate::domain::token::errors::TokenError;
use crate::domain::user::errors::UserError;

/// Errors surfaced by the authentication flows.
///
/// Store-level detail is collapsed where it would tell an untrusted caller
/// more than it needs: which field collided on registration, or whether a
/// login failed on the username or the password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Not found")]
    NotFound,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("User store error: {0}")]
    UserStore(#[from] UserError),

    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::Expired => AuthError::ExpiredToken,
            auth::JwtError::InvalidToken(_) => AuthError::InvalidToken,
            auth::JwtError::EncodingFailed(msg) => AuthError::Signing(msg),
        }
    }
}
