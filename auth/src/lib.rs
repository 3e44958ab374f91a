//! Credential primitives for the authentication service
//!
//! - Password hashing (Argon2id)
//! - Signed identity tokens (HMAC JWT) with access/refresh pairs
//!
//! Both are pure leaves: no storage, no clock other than `Utc::now()` at
//! issue/verify time, no knowledge of users beyond an id and a name.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let pair = handler
//!     .issue_pair("user123", "alice", Duration::minutes(15), Duration::days(7))
//!     .unwrap();
//! let claims = handler.verify(&pair.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod jwt;
pub mod password;

pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenPair;
pub use jwt::TokenUse;
pub use password::PasswordError;
pub use password::PasswordHasher;
