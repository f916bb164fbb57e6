//! JWT access-token generation and verification.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! [`TokenVerifier`] is the single credential-verification point: the
//! extractors and the update orchestrator all resolve bearer tokens
//! through it, so every surface treats a bad credential identically.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quad_core::error::CoreError;
use quad_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit trails.
    pub jti: String,
}

/// Configuration for JWT token generation and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for the given user.
///
/// The token contains the user id, issue time, expiration, and a unique
/// `jti` claim.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verifies bearer credentials and resolves the caller identity.
///
/// Pure verification: no storage access, no I/O. Every failure mode
/// (malformed token, bad signature, expired) maps to
/// [`CoreError::Unauthenticated`]; callers never learn which check failed.
#[derive(Clone)]
pub struct TokenVerifier {
    config: JwtConfig,
}

impl TokenVerifier {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Validate `token` and return the caller's user id (`claims.sub`).
    ///
    /// Signature, expiration, and issued-at claims are checked by
    /// `jsonwebtoken` with its default leeway.
    pub fn verify(&self, token: &str) -> Result<DbId, CoreError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::default(), // HS256, validates exp
        )
        .map_err(|_| CoreError::Unauthenticated("Invalid or expired token".into()))?;
        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    #[test]
    fn generate_and_verify_access_token() {
        let config = test_config();
        let token = generate_access_token(42, &config).expect("token generation should succeed");

        let user_id = TokenVerifier::new(config)
            .verify(&token)
            .expect("token verification should succeed");
        assert_eq!(user_id, 42);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 300, // expired 5 minutes ago (well past leeway)
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = TokenVerifier::new(config).verify(&token);
        assert!(
            matches!(result, Err(CoreError::Unauthenticated(_))),
            "expired token must fail verification"
        );
    }

    #[test]
    fn garbage_token_fails() {
        let result = TokenVerifier::new(test_config()).verify("not-a-jwt-at-all");
        assert!(matches!(result, Err(CoreError::Unauthenticated(_))));
    }

    #[test]
    fn different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            access_token_expiry_mins: 60,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            access_token_expiry_mins: 60,
        };

        let token = generate_access_token(1, &config_a).expect("token generation should succeed");

        let result = TokenVerifier::new(config_b).verify(&token);
        assert!(
            matches!(result, Err(CoreError::Unauthenticated(_))),
            "token signed with a different secret must fail"
        );
    }
}
