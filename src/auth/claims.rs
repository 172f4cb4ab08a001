/// JWT Claims structure
///
/// Represents the payload of an access token (RFC 7519 registered claims only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer stamped into and required from every access token
pub const TOKEN_ISSUER: &str = "chirpy";

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for `user_id` valid until `now + ttl`
    ///
    /// The expiry is truncated to whole seconds, so a token never outlives
    /// the requested lifetime.
    pub fn new(user_id: Uuid, now: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    /// Extract user ID from claims
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// A token is expired from the first second at or past `exp`
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Identity injected into request extensions by `JwtMiddleware`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);
