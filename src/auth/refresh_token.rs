/// Refresh Token Management
///
/// Refresh tokens are:
/// - 32 cryptographically random bytes, hex encoded (64 characters)
/// - Hashed with SHA-256 before storage (never store plaintext)
/// - Valid until they expire or are revoked

use chrono::Utc;
use rand::{thread_rng, RngCore};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{AppError, AuthError};
use crate::store::Store;

const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate a new cryptographically secure refresh token
///
/// The token is returned in plaintext (this is what the client stores).
/// The server stores only the SHA-256 hash.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a refresh token using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Validate a refresh token
///
/// Checks:
/// 1. Token exists in storage
/// 2. Token has not been revoked
/// 3. Token has not expired
///
/// # Returns
/// User ID associated with the token if valid
///
/// # Errors
/// `AuthError::TokenInvalid` for any rejected token, or the storage error
pub async fn validate_refresh_token(store: &dyn Store, token: &str) -> Result<Uuid, AppError> {
    let record = store
        .find_refresh_token(&hash_token(token))
        .await?
        .ok_or_else(|| {
            tracing::warn!("Refresh token not found");
            AppError::Auth(AuthError::TokenInvalid)
        })?;

    if record.is_revoked() {
        tracing::warn!(user_id = %record.user_id, "Attempt to use revoked refresh token");
        return Err(AuthError::TokenInvalid.into());
    }

    if record.is_expired(Utc::now()) {
        tracing::info!(user_id = %record.user_id, "Refresh token expired");
        return Err(AuthError::TokenInvalid.into());
    }

    Ok(record.user_id)
}
