//! JWT validation for Bearer tokens issued by the identity service.
//!
//! Tokens are HS256-signed with a shared secret. This service only validates;
//! issuing access tokens is the identity service's job. The test-only
//! generator exists so integration tests can mint tokens against the same
//! secret.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

static JWT_KEYS: OnceCell<(EncodingKey, DecodingKey)> = OnceCell::new();

/// Initialize JWT keys from the shared secret.
/// Must be called during application startup before any JWT operations.
pub fn initialize_keys(secret: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    JWT_KEYS
        .set((encoding_key, decoding_key))
        .map_err(|_| anyhow!("JWT keys already initialized"))?;

    Ok(())
}

fn keys() -> Result<&'static (EncodingKey, DecodingKey)> {
    JWT_KEYS
        .get()
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup"))
}

/// Validate a token and return its decoded claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let (_, decoding_key) = keys()?;
    let token_data = decode::<Claims>(token, decoding_key, &Validation::default())?;
    Ok(token_data)
}

/// Generate an access token for a user. Used by tests and local tooling.
pub fn generate_token(user_id: Uuid, ttl_seconds: i64) -> Result<String> {
    let (encoding_key, _) = keys()?;
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
    };
    let token = encode(&Header::default(), &claims, encoding_key)?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_validation() {
        let _ = initialize_keys("unit-test-secret");
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, 60).unwrap();
        let data = validate_token(&token).unwrap();
        assert_eq!(data.claims.sub, user_id.to_string());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let _ = initialize_keys("unit-test-secret");
        assert!(validate_token("not-a-token").is_err());
    }
}
