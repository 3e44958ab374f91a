use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenPair;
use super::claims::TokenUse;
use super::errors::JwtError;

/// Signs and verifies identity tokens with a shared secret.
///
/// Tokens are issued with HS256. Verification accepts only the HMAC family
/// (HS256, HS384, HS512), whatever the token header declares, so tokens
/// claiming `none` or an asymmetric algorithm are rejected before any
/// signature check.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validation,
        }
    }

    /// Issue a signed token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Identifier embedded as `user_id`
    /// * `username` - Name embedded as `username`
    /// * `token_use` - Whether the token is an access or a refresh token
    /// * `ttl` - Lifetime, counted from now
    ///
    /// # Returns
    /// Token string and its absolute expiry
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        user_id: &str,
        username: &str,
        token_use: TokenUse,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), JwtError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + ttl;
        let claims = TokenClaims::new(user_id, username, token_use, issued_at, expires_at);

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok((token, expires_at))
    }

    /// Issue an access token and a refresh token with independent lifetimes.
    ///
    /// The pair's `expires_at` is the access token's expiry.
    pub fn issue_pair(
        &self,
        user_id: &str,
        username: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, JwtError> {
        let (access_token, expires_at) =
            self.issue(user_id, username, TokenUse::Access, access_ttl)?;
        let (refresh_token, _) = self.issue(user_id, username, TokenUse::Refresh, refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// * `Expired` - Signature is valid but `exp` has passed
    /// * `InvalidToken` - Malformed, mis-signed, non-HMAC or missing claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}
