/// Domain records and their JSON views
///
/// Records mirror the persisted rows. Views are what the API serializes; the
/// password hash never leaves `User`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Stored refresh token; the plaintext token is only ever held by the client
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Public view of a chirp
#[derive(Debug, Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_omits_password_hash() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: "walt@breakingbad.com".to_string(),
            hashed_password: "$2b$12$secret".to_string(),
            is_chirpy_red: false,
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["email"], "walt@breakingbad.com");
        assert_eq!(json["is_chirpy_red"], false);
        assert!(json.get("hashed_password").is_none());
    }

    #[test]
    fn test_refresh_token_state() {
        let now = Utc::now();
        let mut token = RefreshToken {
            token_hash: "abc".to_string(),
            created_at: now,
            updated_at: now,
            user_id: Uuid::new_v4(),
            expires_at: now + chrono::Duration::days(60),
            revoked_at: None,
        };
        assert!(!token.is_revoked());
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + chrono::Duration::days(61)));

        token.revoked_at = Some(now);
        assert!(token.is_revoked());
    }
}
