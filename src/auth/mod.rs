/// Authentication module
///
/// Handles JWT access token issuance/validation, password hashing,
/// refresh token generation and Authorization header parsing.

mod claims;
mod header;
mod jwt;
mod password;
mod refresh_token;

pub use claims::{AuthenticatedUser, Claims, TOKEN_ISSUER};
pub use header::{extract_api_key, extract_bearer, verify_api_key};
pub use jwt::{generate_access_token, issue_access_token, validate_access_token};
pub use password::{hash_password, verify_password};
pub use refresh_token::{generate_refresh_token, hash_token, validate_refresh_token};
