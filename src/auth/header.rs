/// Authorization header parsing
///
/// Credentials arrive as `Authorization: <Scheme> <value>`. Bearer tokens carry
/// access or refresh tokens; the `ApiKey` scheme is used by the billing webhook.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`
pub fn extract_api_key(headers: &HeaderMap) -> Result<String, AuthError> {
    extract_credential(headers, API_KEY_SCHEME)
}

/// Compare a presented API key with the configured one
///
/// Both sides are hashed to fixed-length digests which are compared without
/// an early exit, so timing does not reveal how much of the key matched.
/// An empty configured key matches nothing.
pub fn verify_api_key(presented: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }

    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented
        .iter()
        .zip(expected.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

fn extract_credential(headers: &HeaderMap, scheme: &str) -> Result<String, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match value.split_once(' ') {
        Some((found, credential)) if found == scheme && !credential.trim().is_empty() => {
            Ok(credential.trim().to_string())
        }
        _ => Err(AuthError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_header() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_bearer(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_header_without_scheme() {
        assert!(extract_bearer(&headers_with("abc")).is_err());
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(extract_bearer(&headers_with("InvalidBearer token")).is_err());
        assert!(extract_bearer(&headers_with("ApiKey token")).is_err());
    }

    #[test]
    fn test_empty_credential() {
        assert!(extract_bearer(&headers_with("Bearer ")).is_err());
    }

    #[test]
    fn test_api_key_header() {
        assert_eq!(extract_api_key(&headers_with("ApiKey f271c81f")).unwrap(), "f271c81f");
        assert!(extract_api_key(&headers_with("Bearer f271c81f")).is_err());
    }

    #[test]
    fn test_verify_api_key() {
        assert!(verify_api_key("f271c81f", "f271c81f"));
        assert!(!verify_api_key("f271c81e", "f271c81f"));
        assert!(!verify_api_key("f271c81", "f271c81f"));
        assert!(!verify_api_key("f271c81ff", "f271c81f"));
        assert!(!verify_api_key("", ""));
    }
}
