/// JWT Token Generation and Validation
///
/// Access tokens are HS256-signed, carry the user id as subject and a fixed
/// issuer, and are never persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::{Claims, TOKEN_ISSUER};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Sign an access token for `user_id` that expires after `ttl`
///
/// # Errors
/// Returns an internal error if encoding fails
pub fn issue_access_token(user_id: &Uuid, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let claims = Claims::new(*user_id, Utc::now(), ttl);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Sign an access token using the configured secret and lifetime
pub fn generate_access_token(user_id: &Uuid, config: &JwtSettings) -> Result<String, AppError> {
    issue_access_token(user_id, &config.secret, Duration::seconds(config.access_token_expiry))
}

/// Validate an access token and return the user id it was issued for
///
/// Signature, issuer, expiry and subject are all checked. Every failure is
/// reported as `AuthError::TokenInvalid`.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    validation.leeway = 0;

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("JWT validation error: {}", e);
            AuthError::TokenInvalid
        })?;

    if claims.is_expired() {
        tracing::debug!("JWT expired");
        return Err(AuthError::TokenInvalid);
    }

    claims.user_id().ok_or_else(|| {
        tracing::debug!("JWT subject is not a user id");
        AuthError::TokenInvalid
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    #[test]
    fn test_generate_and_validate_token() {
        let user_id = Uuid::new_v4();

        let token = issue_access_token(&user_id, SECRET, Duration::minutes(1))
            .expect("Failed to generate token");
        let validated = validate_access_token(&token, SECRET).expect("Failed to validate token");

        assert_eq!(validated, user_id);
    }

    #[test]
    fn test_generate_from_settings() {
        let config = JwtSettings {
            secret: SECRET.to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 5_184_000,
        };
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, &config).expect("Failed to generate token");

        assert_eq!(validate_access_token(&token, SECRET), Ok(user_id));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_access_token(&Uuid::new_v4(), "custom", Duration::minutes(1))
            .expect("Failed to generate token");

        assert_eq!(validate_access_token(&token, SECRET), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_expired_token() {
        let token = issue_access_token(&Uuid::new_v4(), SECRET, Duration::milliseconds(1))
            .expect("Failed to generate token");
        std::thread::sleep(std::time::Duration::from_millis(2));

        assert_eq!(validate_access_token(&token, SECRET), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_invalid_token() {
        assert!(validate_access_token("invalid.token.here", SECRET).is_err());
    }

    #[test]
    fn test_tampered_token() {
        let token = issue_access_token(&Uuid::new_v4(), SECRET, Duration::minutes(1))
            .expect("Failed to generate token");

        let tampered = format!("{}X", token);
        assert!(validate_access_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_non_uuid_subject() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: now + 60,
            iat: now,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(validate_access_token(&token, SECRET), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn test_wrong_issuer() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now + 60,
            iat: now,
            iss: "someone-else".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&token, SECRET).is_err());
    }
}
