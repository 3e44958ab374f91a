use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Salted one-way password hashing (Argon2id).
///
/// Every call to [`PasswordHasher::hash`] draws a fresh salt, so equal
/// plaintexts never produce equal digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Largest password, in bytes, accepted for hashing.
    pub const MAX_PASSWORD_LENGTH: usize = 4096;

    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds `MAX_PASSWORD_LENGTH`
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > Self::MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong {
                max: Self::MAX_PASSWORD_LENGTH,
                actual: password.len(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// Returns false on mismatch and on digests that cannot be parsed.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_equal_passwords_get_distinct_digests() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("pw123456").expect("Failed to hash password");
        let second = hasher.hash("pw123456").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("pw123456", &first));
        assert!(hasher.verify("pw123456", &second));
    }

    #[test]
    fn test_verify_malformed_digest_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_hash_rejects_oversized_password() {
        let hasher = PasswordHasher::new();
        let password = "a".repeat(PasswordHasher::MAX_PASSWORD_LENGTH + 1);

        let result = hasher.hash(&password);
        assert!(matches!(
            result,
            Err(PasswordError::TooLong { max, actual })
                if max == PasswordHasher::MAX_PASSWORD_LENGTH
                    && actual == PasswordHasher::MAX_PASSWORD_LENGTH + 1
        ));
    }

    #[test]
    fn test_hash_accepts_password_at_limit() {
        let hasher = PasswordHasher::new();
        let password = "b".repeat(PasswordHasher::MAX_PASSWORD_LENGTH);

        let hash = hasher.hash(&password).expect("Failed to hash password");
        assert!(hasher.verify(&password, &hash));
    }
}
