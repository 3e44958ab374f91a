use thiserror::Error;

/// Errors raised by the refresh-token store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token already stored")]
    AlreadyExists,

    /// The record exists but its expiry has passed. Callers authorizing a
    /// request treat this exactly like `NotFound`.
    #[error("Refresh token expired")]
    Expired,
}
