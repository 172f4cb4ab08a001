/// Password Hashing and Verification
///
/// Passwords are stored as salted bcrypt hashes at the default cost.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AppError, ValidationError};

/// bcrypt only reads the first 72 bytes of its input
const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password using bcrypt
///
/// # Errors
/// Returns error if:
/// - Password is empty or longer than bcrypt can represent
/// - Bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField("password".to_string()).into());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::TooLong("password".to_string(), MAX_PASSWORD_BYTES).into());
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
///
/// Returns `Ok(false)` on mismatch so callers can answer 401; `Err` means the
/// stored hash itself could not be processed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
